// CLI module for running and administering the service

pub mod seed;

use clap::{Parser, Subcommand};

/// Microblog backend CLI
#[derive(Parser)]
#[command(name = "microblog")]
#[command(about = "Microblog backend service CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run migrations and start the HTTP server (the default)
    Serve,

    /// Run pending database migrations and exit
    Migrate,

    /// Populate the database with sample users and posts
    Seed(seed::SeedArgs),
}
