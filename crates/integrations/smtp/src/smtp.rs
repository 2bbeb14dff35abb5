use std::time::Duration;

use async_trait::async_trait;
use herald_provider::ProviderError;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info};

use crate::backend::EmailBackend;
use crate::config::SmtpConfiguration;

/// Deadline for one delivery attempt when none is configured.
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// SMTP delivery backend using `lettre`.
pub struct SmtpBackend {
    server: String,
    port: u16,
    timeout: Duration,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpBackend")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("transport", &"<AsyncSmtpTransport>")
            .finish()
    }
}

impl SmtpBackend {
    /// Create a new `SmtpBackend` from the plugin configuration.
    pub fn new(config: &SmtpConfiguration) -> Result<Self, ProviderError> {
        let transport = build_transport(config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a `SmtpBackend` with a pre-built transport (for testing).
    pub fn with_transport(
        config: &SmtpConfiguration,
        transport: AsyncSmtpTransport<Tokio1Executor>,
    ) -> Self {
        Self {
            server: config.smtp_server.clone(),
            port: config.smtp_port,
            timeout: command_timeout(config),
            transport,
        }
    }
}

#[async_trait]
impl EmailBackend for SmtpBackend {
    async fn send(&self, message: &Message) -> Result<(), ProviderError> {
        debug!(server = %self.server, port = self.port, "sending message via SMTP");
        tokio::time::timeout(self.timeout, self.transport.send(message.clone()))
            .await
            .map_err(|_| {
                error!(timeout = ?self.timeout, "SMTP send timed out");
                ProviderError::Timeout(self.timeout)
            })?
            .map_err(|e| {
                error!(error = %e, "SMTP send failed");
                map_smtp_error(&e, self.timeout)
            })?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        debug!(server = %self.server, port = self.port, "performing SMTP health check");
        let connected = tokio::time::timeout(self.timeout, self.transport.test_connection())
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
            .map_err(|e| {
                error!(error = %e, "SMTP health check failed");
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout)
                } else {
                    ProviderError::Connection(format!("SMTP health check failed: {e}"))
                }
            })?;
        if !connected {
            return Err(ProviderError::Connection(
                "SMTP server did not accept the connection".into(),
            ));
        }
        info!("SMTP health check passed");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "smtp"
    }
}

/// Build an async SMTP transport from the given configuration.
///
/// Without `tls` the connection is plain SMTP, which is what internal relays
/// on port 25 usually expect.
fn build_transport(
    config: &SmtpConfiguration,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, ProviderError> {
    let builder = if config.tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
            .map_err(|e| ProviderError::Configuration(format!("SMTP TLS relay error: {e}")))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_server)
    };

    let builder = builder
        .port(config.smtp_port)
        .timeout(Some(command_timeout(config)));

    let builder = if let (Some(user), Some(pass)) = (&config.username, &config.password) {
        builder.credentials(Credentials::new(user.clone(), pass.clone()))
    } else {
        builder
    };

    Ok(builder.build())
}

fn command_timeout(config: &SmtpConfiguration) -> Duration {
    config.timeout().unwrap_or(DEFAULT_COMMAND_TIMEOUT)
}

/// Map a lettre SMTP error to the appropriate `ProviderError` variant.
fn map_smtp_error(error: &lettre::transport::smtp::Error, timeout: Duration) -> ProviderError {
    let message = error.to_string();

    if error.is_timeout() {
        ProviderError::Timeout(timeout)
    } else if error.is_transient() {
        ProviderError::Connection(format!("transient SMTP error: {message}"))
    } else if error.is_permanent() {
        ProviderError::ExecutionFailed(format!("permanent SMTP error: {message}"))
    } else {
        // Covers TLS, connection, response parsing, and other errors.
        ProviderError::Connection(format!("SMTP error: {message}"))
    }
}
