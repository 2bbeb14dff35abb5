use herald_core::{DeliveryReport, Notification};
use herald_messaging::{create_message_body, create_multi_message_body};
use herald_provider::{EmailPlugin, Plugin, PluginMetadata, ProviderError};
use tracing::{debug, info, instrument};

use crate::backend::EmailBackend;
use crate::config::SmtpConfiguration;
use crate::message::create_html_message;
use crate::retry::send_message;
use crate::smtp::SmtpBackend;
use crate::subject::build_subject;

const METADATA: PluginMetadata = PluginMetadata {
    title: "SMTP Email Plugin - Email Management",
    slug: "smtp-email",
    description: "Uses SMTP to facilitate emails.",
    version: env!("CARGO_PKG_VERSION"),
    author: "Nvidia",
    author_url: "https://github.com/netflix/dispatch.git",
};

/// An email plugin that renders notifications to HTML and sends them over
/// SMTP.
///
/// # Examples
///
/// ```no_run
/// use herald_provider::Plugin;
/// use herald_smtp::{SmtpConfiguration, SmtpEmailPlugin};
///
/// let config = SmtpConfiguration::new("smtp.example.com", "dispatch@example.com");
/// let plugin = SmtpEmailPlugin::new(config).unwrap();
/// assert_eq!(Plugin::metadata(&plugin).slug, "smtp-email");
/// ```
pub struct SmtpEmailPlugin {
    config: SmtpConfiguration,
    backend: Box<dyn EmailBackend>,
}

impl std::fmt::Debug for SmtpEmailPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpEmailPlugin")
            .field("config", &self.config)
            .field("backend", &self.backend)
            .finish()
    }
}

impl SmtpEmailPlugin {
    /// Create a plugin that talks to the configured SMTP server.
    ///
    /// Returns [`ProviderError::Configuration`] if the configuration is
    /// unusable or the transport cannot be built.
    pub fn new(config: SmtpConfiguration) -> Result<Self, ProviderError> {
        config.validate()?;
        let backend = SmtpBackend::new(&config)?;
        Ok(Self {
            config,
            backend: Box::new(backend),
        })
    }

    /// Create a plugin with a pre-built backend (for testing).
    pub fn with_backend(
        config: SmtpConfiguration,
        backend: Box<dyn EmailBackend>,
    ) -> Result<Self, ProviderError> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// The configuration this plugin was built from.
    pub fn config(&self) -> &SmtpConfiguration {
        &self.config
    }

    fn render_body(notification: &Notification) -> Result<String, ProviderError> {
        let vars = notification.template_vars();
        let rendered = if notification.items.is_empty() {
            create_message_body(
                &notification.notification_template,
                notification.notification_type,
                &vars,
            )
        } else {
            create_multi_message_body(
                &notification.notification_template,
                notification.notification_type,
                &notification.items,
                &vars,
            )
        };
        rendered.map_err(|e| ProviderError::Template(e.to_string()))
    }
}

impl Plugin for SmtpEmailPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &METADATA
    }

    fn configuration_schema(&self) -> schemars::Schema {
        schemars::schema_for!(SmtpConfiguration)
    }
}

impl EmailPlugin for SmtpEmailPlugin {
    #[instrument(
        skip(self, notification),
        fields(
            plugin = "smtp-email",
            notification_id = %notification.id,
            notification_type = %notification.notification_type,
        )
    )]
    async fn send(&self, notification: &Notification) -> Result<DeliveryReport, ProviderError> {
        let subject = build_subject(
            &notification.notification_text,
            notification.name.as_deref(),
            notification.subject.as_deref(),
        );
        let cc = notification.cc.as_deref().unwrap_or_default();

        debug!(
            blocks = notification.notification_template.len(),
            items = notification.items.len(),
            "rendering message body"
        );
        let body = Self::render_body(notification)?;

        let message = create_html_message(
            &self.config.from_email_address,
            &notification.recipient,
            cc,
            &subject,
            &body,
        )?;

        info!(
            to = %notification.recipient,
            subject = %subject,
            backend = self.backend.backend_name(),
            "sending email"
        );
        Ok(send_message(self.backend.as_ref(), &message, self.config.max_send_attempts).await)
    }

    #[instrument(skip(self), fields(plugin = "smtp-email"))]
    async fn health_check(&self) -> Result<(), ProviderError> {
        self.backend.health_check().await
    }
}
