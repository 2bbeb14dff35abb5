use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use herald_core::{DeliveryReport, Notification};
use tracing::{info, instrument, warn};

use crate::error::ProviderError;
use crate::plugin::{DynEmailPlugin, EmailPlugin, Plugin, PluginMetadata};

/// Atomic counters tracking calls into an email plugin.
///
/// All counters use relaxed ordering. For a consistent point-in-time view,
/// call [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct PluginMetrics {
    /// Total number of `send` calls.
    pub calls: AtomicU64,
    /// Sends accepted by the transport.
    pub delivered: AtomicU64,
    /// Sends where every transport attempt failed.
    pub undelivered: AtomicU64,
    /// Sends that failed before reaching the transport.
    pub errors: AtomicU64,
    /// Total number of health checks.
    pub health_checks: AtomicU64,
    /// Cumulative wall-clock time spent in `send`, in microseconds.
    pub total_send_micros: AtomicU64,
}

impl PluginMetrics {
    fn record_send(&self, result: &Result<DeliveryReport, ProviderError>, started: Instant) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match result {
            Ok(report) if report.delivered => self.delivered.fetch_add(1, Ordering::Relaxed),
            Ok(_) => self.undelivered.fetch_add(1, Ordering::Relaxed),
            Err(_) => self.errors.fetch_add(1, Ordering::Relaxed),
        };
        let micros = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.total_send_micros.fetch_add(micros, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> PluginMetricsSnapshot {
        PluginMetricsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            undelivered: self.undelivered.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            health_checks: self.health_checks.load(Ordering::Relaxed),
            total_send_micros: self.total_send_micros.load(Ordering::Relaxed),
        }
    }
}

/// A plain data snapshot of [`PluginMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PluginMetricsSnapshot {
    pub calls: u64,
    pub delivered: u64,
    pub undelivered: u64,
    pub errors: u64,
    pub health_checks: u64,
    pub total_send_micros: u64,
}

/// Wraps a plugin so every call is counted and timed.
///
/// The wrapper is itself an [`EmailPlugin`], so it can be used anywhere the
/// inner plugin could.
///
/// # Examples
///
/// ```
/// use herald_provider::{ConsolePlugin, Instrumented};
///
/// let plugin = Instrumented::new(ConsolePlugin::new());
/// assert_eq!(plugin.metrics().snapshot().calls, 0);
/// ```
pub struct Instrumented {
    inner: Box<dyn DynEmailPlugin>,
    metrics: Arc<PluginMetrics>,
}

impl std::fmt::Debug for Instrumented {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instrumented")
            .field("plugin", &self.inner.metadata().slug)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Instrumented {
    /// Wrap a concrete plugin.
    pub fn new<P: EmailPlugin + 'static>(plugin: P) -> Self {
        Self::from_dyn(Box::new(plugin))
    }

    /// Wrap an already type-erased plugin.
    pub fn from_dyn(inner: Box<dyn DynEmailPlugin>) -> Self {
        Self {
            inner,
            metrics: Arc::new(PluginMetrics::default()),
        }
    }

    /// Shared handle to the counters.
    pub fn metrics(&self) -> Arc<PluginMetrics> {
        Arc::clone(&self.metrics)
    }
}

impl Plugin for Instrumented {
    fn metadata(&self) -> &PluginMetadata {
        self.inner.metadata()
    }

    fn configuration_schema(&self) -> schemars::Schema {
        self.inner.configuration_schema()
    }
}

impl EmailPlugin for Instrumented {
    #[instrument(
        skip_all,
        fields(plugin = self.inner.metadata().slug, notification_id = %notification.id)
    )]
    async fn send(&self, notification: &Notification) -> Result<DeliveryReport, ProviderError> {
        let started = Instant::now();
        let result = self.inner.send(notification).await;
        self.metrics.record_send(&result, started);

        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(report) => info!(
                delivered = report.delivered,
                attempts = report.attempts,
                elapsed_ms = %elapsed_ms,
                "send finished"
            ),
            Err(e) => warn!(error = %e, elapsed_ms = %elapsed_ms, "send failed"),
        }
        result
    }

    #[instrument(skip_all, fields(plugin = self.inner.metadata().slug))]
    async fn health_check(&self) -> Result<(), ProviderError> {
        self.metrics.health_checks.fetch_add(1, Ordering::Relaxed);
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use herald_core::MessageType;

    use super::*;

    const METADATA: PluginMetadata = PluginMetadata {
        title: "Scripted",
        slug: "scripted",
        description: "Returns a fixed outcome.",
        version: "0.0.0",
        author: "tests",
        author_url: "https://example.com",
    };

    enum Outcome {
        Delivered,
        Undelivered,
        Error,
    }

    struct ScriptedPlugin(Outcome);

    impl Plugin for ScriptedPlugin {
        fn metadata(&self) -> &PluginMetadata {
            &METADATA
        }
    }

    impl EmailPlugin for ScriptedPlugin {
        async fn send(&self, _n: &Notification) -> Result<DeliveryReport, ProviderError> {
            match self.0 {
                Outcome::Delivered => Ok(DeliveryReport::delivered(1)),
                Outcome::Undelivered => Ok(DeliveryReport::undelivered(3)),
                Outcome::Error => Err(ProviderError::ExecutionFailed("bad address".into())),
            }
        }

        async fn health_check(&self) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    fn notification() -> Notification {
        Notification::new("a@example.com", "hi", MessageType::CaseNotification)
    }

    #[test]
    fn default_metrics_are_zero() {
        let snap = PluginMetrics::default().snapshot();
        assert_eq!(snap.calls, 0);
        assert_eq!(snap.delivered, 0);
        assert_eq!(snap.undelivered, 0);
        assert_eq!(snap.errors, 0);
        assert_eq!(snap.health_checks, 0);
        assert_eq!(snap.total_send_micros, 0);
    }

    #[tokio::test]
    async fn counts_each_outcome() {
        let delivered = Instrumented::new(ScriptedPlugin(Outcome::Delivered));
        let undelivered = Instrumented::new(ScriptedPlugin(Outcome::Undelivered));
        let failing = Instrumented::new(ScriptedPlugin(Outcome::Error));

        EmailPlugin::send(&delivered, &notification()).await.unwrap();
        EmailPlugin::send(&delivered, &notification()).await.unwrap();
        EmailPlugin::send(&undelivered, &notification()).await.unwrap();
        assert!(EmailPlugin::send(&failing, &notification()).await.is_err());

        let snap = delivered.metrics().snapshot();
        assert_eq!(snap.calls, 2);
        assert_eq!(snap.delivered, 2);

        let snap = undelivered.metrics().snapshot();
        assert_eq!(snap.calls, 1);
        assert_eq!(snap.undelivered, 1);
        assert_eq!(snap.delivered, 0);

        let snap = failing.metrics().snapshot();
        assert_eq!(snap.calls, 1);
        assert_eq!(snap.errors, 1);
    }

    #[tokio::test]
    async fn counts_health_checks_and_forwards_metadata() {
        let plugin = Instrumented::new(ScriptedPlugin(Outcome::Delivered));
        EmailPlugin::health_check(&plugin).await.unwrap();
        EmailPlugin::health_check(&plugin).await.unwrap();
        assert_eq!(plugin.metrics().snapshot().health_checks, 2);
        assert_eq!(Plugin::metadata(&plugin).slug, "scripted");
    }

    #[tokio::test]
    async fn metrics_handle_outlives_borrow() {
        let plugin = Instrumented::new(ScriptedPlugin(Outcome::Delivered));
        let metrics = plugin.metrics();
        EmailPlugin::send(&plugin, &notification()).await.unwrap();
        assert_eq!(metrics.snapshot().calls, 1);
    }
}
