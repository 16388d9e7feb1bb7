use async_trait::async_trait;

/// Delivery seam for account activation email
///
/// The transport (SMTP relay, provider API) is an external collaborator;
/// this trait is the boundary the application talks to.
#[async_trait]
pub trait ActivationMailer: Send + Sync {
    /// Hand the raw activation token off for delivery to the given address
    async fn send_activation_email(&self, email: &str, name: &str, token: &str);
}

/// Mailer that records deliveries in the log instead of sending them
///
/// Default implementation for development and tests.
pub struct LogMailer;

#[async_trait]
impl ActivationMailer for LogMailer {
    async fn send_activation_email(&self, email: &str, name: &str, token: &str) {
        tracing::info!(
            email = %email,
            name = %name,
            "activation email queued: POST /users/activate {{ \"email\": \"{}\", \"token\": \"{}\" }}",
            email,
            token
        );
    }
}
