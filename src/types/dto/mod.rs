pub mod auth;
pub mod common;
pub mod micropost;
pub mod relationship;
pub mod user;
