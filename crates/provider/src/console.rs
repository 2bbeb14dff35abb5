use herald_core::{DeliveryReport, Notification};
use tracing::info;

use crate::error::ProviderError;
use crate::plugin::{EmailPlugin, Plugin, PluginMetadata};

const METADATA: PluginMetadata = PluginMetadata {
    title: "Console Email Plugin",
    slug: "console-email",
    description: "Logs notifications instead of sending them.",
    version: env!("CARGO_PKG_VERSION"),
    author: "Herald",
    author_url: "https://github.com/herald/herald",
};

/// A plugin that logs the notification and reports it delivered without
/// performing any network I/O.
///
/// Useful for local development and dry runs where no SMTP server is
/// available.
#[derive(Debug, Default)]
pub struct ConsolePlugin;

impl ConsolePlugin {
    /// Create a new `ConsolePlugin`.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ConsolePlugin {
    fn metadata(&self) -> &PluginMetadata {
        &METADATA
    }
}

impl EmailPlugin for ConsolePlugin {
    #[allow(clippy::unused_async)]
    async fn send(&self, notification: &Notification) -> Result<DeliveryReport, ProviderError> {
        info!(
            notification_id = %notification.id,
            recipient = %notification.recipient,
            notification_type = %notification.notification_type,
            blocks = notification.notification_template.len(),
            items = notification.items.len(),
            "console plugin received notification"
        );
        Ok(DeliveryReport::delivered(1))
    }

    #[allow(clippy::unused_async)]
    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use herald_core::MessageType;

    use super::*;

    #[test]
    fn console_plugin_metadata() {
        let plugin = ConsolePlugin::new();
        assert_eq!(Plugin::metadata(&plugin).slug, "console-email");
        assert_eq!(Plugin::metadata(&plugin).version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn console_plugin_reports_delivery() {
        let plugin = ConsolePlugin::new();
        let notification =
            Notification::new("a@example.com", "hello", MessageType::IncidentNotification);
        let report = EmailPlugin::send(&plugin, &notification).await.unwrap();
        assert_eq!(report, DeliveryReport::delivered(1));
    }

    #[tokio::test]
    async fn console_plugin_health_check() {
        EmailPlugin::health_check(&ConsolePlugin::new()).await.unwrap();
    }
}
