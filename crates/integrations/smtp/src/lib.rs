pub mod backend;
pub mod config;
pub mod message;
pub mod plugin;
pub mod retry;
pub mod smtp;
pub mod subject;

pub use config::SmtpConfiguration;
pub use plugin::SmtpEmailPlugin;

// Re-export backend trait for external use.
pub use backend::EmailBackend;
pub use message::create_html_message;
pub use retry::send_message;
pub use smtp::SmtpBackend;
pub use subject::build_subject;
