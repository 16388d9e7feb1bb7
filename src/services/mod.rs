pub mod crypto;
pub mod mailer;
pub mod session_service;
pub mod validation;

pub use mailer::{ActivationMailer, LogMailer};
pub use session_service::SessionService;
