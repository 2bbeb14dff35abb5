use std::path::Path;

use anyhow::Context;
use herald_smtp::SmtpConfiguration;
use serde::Deserialize;
use tracing::info;

/// Top-level structure of `herald.toml`.
#[derive(Debug, Deserialize)]
pub struct HeraldConfig {
    pub smtp: SmtpConfiguration,
}

impl HeraldConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        info!(
            path = %path.display(),
            server = %config.smtp.smtp_server,
            port = config.smtp.smtp_port,
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
