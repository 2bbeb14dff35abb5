use std::time::Duration;

use herald_provider::ProviderError;
use lettre::message::Mailbox;
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Default SMTP port (plain SMTP relay).
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Default number of delivery attempts per message.
pub const DEFAULT_MAX_SEND_ATTEMPTS: u32 = 3;

/// Configuration for the SMTP email plugin.
///
/// Only `smtp_server` and `from_email_address` are required. The port
/// defaults to 25 and the connection is plain SMTP unless `tls` is set.
///
/// # Examples
///
/// ```
/// use herald_smtp::SmtpConfiguration;
///
/// let config: SmtpConfiguration = toml::from_str(r#"
///     smtp_server = "mail.example.com"
///     smtp_port = "2525"
///     from_email_address = "dispatch@example.com"
/// "#).unwrap();
/// assert_eq!(config.smtp_port, 2525);
/// assert_eq!(config.max_send_attempts, 3);
/// assert!(!config.tls);
/// ```
#[derive(Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "SMTP configuration")]
pub struct SmtpConfiguration {
    /// SMTP server hostname.
    #[schemars(title = "SMTP Server", description = "SMTP Server address.")]
    pub smtp_server: String,

    /// SMTP server port. Accepts a number or a numeric string.
    #[serde(
        default = "default_smtp_port",
        deserialize_with = "deserialize_port"
    )]
    #[schemars(
        with = "u16",
        title = "SMTP Server Port",
        description = "SMTP Server Port, default is 25"
    )]
    pub smtp_port: u16,

    /// The `From` address used in outgoing emails.
    #[schemars(title = "From email address", description = "From email address.")]
    pub from_email_address: String,

    /// Optional SMTP username for authentication.
    #[serde(default)]
    #[schemars(title = "Username", description = "Optional SMTP AUTH username.")]
    pub username: Option<String>,

    /// Optional SMTP password for authentication.
    #[serde(default)]
    #[schemars(title = "Password", description = "Optional SMTP AUTH password.")]
    pub password: Option<String>,

    /// Whether to upgrade the connection with STARTTLS.
    #[serde(default)]
    #[schemars(
        title = "STARTTLS",
        description = "Upgrade the connection with STARTTLS, default is false"
    )]
    pub tls: bool,

    /// Number of delivery attempts before a message is reported undelivered.
    #[serde(default = "default_max_send_attempts")]
    #[schemars(
        title = "Send attempts",
        description = "Delivery attempts per message, default is 3"
    )]
    pub max_send_attempts: u32,

    /// Deadline for connecting and for each delivery attempt, in seconds.
    /// Defaults to 60 when unset.
    #[serde(default)]
    #[schemars(
        title = "Timeout",
        description = "Connect and per-attempt SMTP timeout in seconds, default is 60"
    )]
    pub timeout_seconds: Option<u64>,
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_max_send_attempts() -> u32 {
    DEFAULT_MAX_SEND_ATTEMPTS
}

fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid SMTP port {text:?}"))),
    }
}

impl std::fmt::Debug for SmtpConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfiguration")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("from_email_address", &self.from_email_address)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("tls", &self.tls)
            .field("max_send_attempts", &self.max_send_attempts)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl SmtpConfiguration {
    /// Create a configuration for a plain SMTP relay on port 25.
    pub fn new(smtp_server: impl Into<String>, from_email_address: impl Into<String>) -> Self {
        Self {
            smtp_server: smtp_server.into(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_email_address: from_email_address.into(),
            username: None,
            password: None,
            tls: false,
            max_send_attempts: DEFAULT_MAX_SEND_ATTEMPTS,
            timeout_seconds: None,
        }
    }

    /// Override the default SMTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }

    /// Set SMTP authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set whether STARTTLS should be used.
    #[must_use]
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Override the number of delivery attempts.
    #[must_use]
    pub fn with_max_send_attempts(mut self, attempts: u32) -> Self {
        self.max_send_attempts = attempts;
        self
    }

    /// Set the SMTP timeout. Fractions of a second round up.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.timeout_seconds = Some(secs);
        self
    }

    /// The SMTP timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.smtp_server.trim().is_empty() {
            return Err(ProviderError::Configuration(
                "smtp_server must not be empty".into(),
            ));
        }
        if self.smtp_port == 0 {
            return Err(ProviderError::Configuration(
                "smtp_port must be between 1 and 65535".into(),
            ));
        }
        if self.max_send_attempts == 0 {
            return Err(ProviderError::Configuration(
                "max_send_attempts must be at least 1".into(),
            ));
        }
        if self.timeout_seconds == Some(0) {
            return Err(ProviderError::Configuration(
                "timeout_seconds must be at least 1".into(),
            ));
        }
        self.from_email_address
            .parse::<Mailbox>()
            .map_err(|e| ProviderError::Configuration(format!("invalid from address: {e}")))?;
        Ok(())
    }
}

impl Default for SmtpConfiguration {
    fn default() -> Self {
        Self::new("localhost", "noreply@localhost")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SmtpConfiguration::default();
        assert_eq!(config.smtp_server, "localhost");
        assert_eq!(config.smtp_port, 25);
        assert!(!config.tls);
        assert!(config.username.is_none());
        assert!(config.password.is_none());
        assert_eq!(config.max_send_attempts, 3);
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let config = SmtpConfiguration::new("smtp.example.com", "me@example.com")
            .with_port(587)
            .with_tls(true)
            .with_credentials("user", "pass")
            .with_max_send_attempts(5)
            .with_timeout(Duration::from_secs(10));
        assert_eq!(config.smtp_port, 587);
        assert!(config.tls);
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("pass"));
        assert_eq!(config.max_send_attempts, 5);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn port_accepts_number_or_string() {
        let numeric: SmtpConfiguration = serde_json::from_value(serde_json::json!({
            "smtp_server": "mail",
            "smtp_port": 1025,
            "from_email_address": "a@example.com"
        }))
        .unwrap();
        assert_eq!(numeric.smtp_port, 1025);

        let text: SmtpConfiguration = serde_json::from_value(serde_json::json!({
            "smtp_server": "mail",
            "smtp_port": " 465 ",
            "from_email_address": "a@example.com"
        }))
        .unwrap();
        assert_eq!(text.smtp_port, 465);
    }

    #[test]
    fn port_defaults_to_25() {
        let config: SmtpConfiguration = serde_json::from_value(serde_json::json!({
            "smtp_server": "mail",
            "from_email_address": "a@example.com"
        }))
        .unwrap();
        assert_eq!(config.smtp_port, 25);
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let result = serde_json::from_value::<SmtpConfiguration>(serde_json::json!({
            "smtp_server": "mail",
            "smtp_port": "smtp",
            "from_email_address": "a@example.com"
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid SMTP port"), "{err}");
    }

    #[test]
    fn missing_server_is_rejected() {
        let result = serde_json::from_value::<SmtpConfiguration>(serde_json::json!({
            "from_email_address": "a@example.com"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let base = SmtpConfiguration::new("mail", "a@example.com");

        let mut config = base.clone();
        config.smtp_server = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ProviderError::Configuration(_))
        ));

        assert!(base.clone().with_port(0).validate().is_err());
        assert!(base.clone().with_max_send_attempts(0).validate().is_err());

        let mut config = base;
        config.from_email_address = "not-an-address".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid from address"));
    }

    #[test]
    fn sub_second_timeout_rounds_up() {
        let config = SmtpConfiguration::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_secs(1)));
        assert!(config.validate().is_ok());

        let config = SmtpConfiguration::default().with_timeout(Duration::from_millis(2_001));
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = SmtpConfiguration::default().with_timeout(Duration::ZERO);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"), "{err}");

        let config: SmtpConfiguration = serde_json::from_value(serde_json::json!({
            "smtp_server": "mail",
            "from_email_address": "a@example.com",
            "timeout_seconds": 0
        }))
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ProviderError::Configuration(_))
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let config =
            SmtpConfiguration::new("mail", "a@example.com").with_credentials("user", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn schema_carries_titles_and_required_fields() {
        let schema = schemars::schema_for!(SmtpConfiguration);
        let json = serde_json::to_value(&schema).unwrap();

        assert_eq!(json["properties"]["smtp_server"]["title"], "SMTP Server");
        assert_eq!(
            json["properties"]["smtp_port"]["description"],
            "SMTP Server Port, default is 25"
        );
        let required: Vec<&str> = json["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"smtp_server"));
        assert!(required.contains(&"from_email_address"));
        assert!(!required.contains(&"smtp_port"));
    }
}
