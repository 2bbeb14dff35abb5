use async_trait::async_trait;
use herald_provider::ProviderError;
use lettre::Message;

/// Trait for pluggable mail delivery backends.
///
/// Implementations handle the actual transport of a finished message, while
/// [`SmtpEmailPlugin`](crate::plugin::SmtpEmailPlugin) handles subject, body
/// and retries.
#[async_trait]
pub trait EmailBackend: Send + Sync + std::fmt::Debug {
    /// Hand a message to the mail server.
    async fn send(&self, message: &Message) -> Result<(), ProviderError>;

    /// Perform a health check to verify the backend is operational.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Return the backend name (e.g. `"smtp"`).
    fn backend_name(&self) -> &'static str;
}
