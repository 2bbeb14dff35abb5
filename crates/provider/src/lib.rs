pub mod console;
pub mod error;
pub mod instrument;
pub mod plugin;

pub use console::ConsolePlugin;
pub use error::ProviderError;
pub use instrument::{Instrumented, PluginMetrics, PluginMetricsSnapshot};
pub use plugin::{DynEmailPlugin, EmailPlugin, Plugin, PluginMetadata};
