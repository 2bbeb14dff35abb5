use async_trait::async_trait;
use herald_core::{DeliveryReport, Notification};
use serde::Serialize;

use crate::error::ProviderError;

/// Descriptive information every plugin exposes to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginMetadata {
    /// Display title.
    pub title: &'static str,
    /// Unique, URL-safe identifier.
    pub slug: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Plugin version.
    pub version: &'static str,
    /// Maintainer.
    pub author: &'static str,
    /// Where the plugin is maintained.
    pub author_url: &'static str,
}

/// Behaviour shared by all plugins regardless of capability.
pub trait Plugin: Send + Sync {
    /// Static description of the plugin.
    fn metadata(&self) -> &PluginMetadata;

    /// JSON schema of the configuration the plugin accepts.
    ///
    /// Defaults to an object with no properties for plugins that take no
    /// configuration.
    fn configuration_schema(&self) -> schemars::Schema {
        schemars::json_schema!({
            "type": "object",
            "properties": {}
        })
    }
}

/// A plugin able to deliver notifications by email.
///
/// This trait is **not** object-safe because it uses native `async fn` methods.
/// Use [`DynEmailPlugin`] for dynamic dispatch; every `EmailPlugin`
/// implements it through a blanket implementation.
pub trait EmailPlugin: Plugin {
    /// Render and deliver a notification.
    ///
    /// Returns `Err` when the notification cannot be turned into a message.
    /// Delivery failures after the message was built are reported through
    /// [`DeliveryReport::delivered`] instead.
    fn send(
        &self,
        notification: &Notification,
    ) -> impl std::future::Future<Output = Result<DeliveryReport, ProviderError>> + Send;

    /// Verify that the underlying transport is reachable.
    fn health_check(&self) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;
}

/// Object-safe email plugin trait for use behind `Box<dyn DynEmailPlugin>`.
///
/// You generally should not implement this trait directly. Implement
/// [`EmailPlugin`] and rely on the blanket implementation.
#[async_trait]
pub trait DynEmailPlugin: Send + Sync {
    /// Static description of the plugin.
    fn metadata(&self) -> &PluginMetadata;

    /// JSON schema of the configuration the plugin accepts.
    fn configuration_schema(&self) -> schemars::Schema;

    /// Render and deliver a notification.
    async fn send(&self, notification: &Notification) -> Result<DeliveryReport, ProviderError>;

    /// Verify that the underlying transport is reachable.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

#[async_trait]
impl<T: EmailPlugin + Sync> DynEmailPlugin for T {
    fn metadata(&self) -> &PluginMetadata {
        Plugin::metadata(self)
    }

    fn configuration_schema(&self) -> schemars::Schema {
        Plugin::configuration_schema(self)
    }

    async fn send(&self, notification: &Notification) -> Result<DeliveryReport, ProviderError> {
        EmailPlugin::send(self, notification).await
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        EmailPlugin::health_check(self).await
    }
}
