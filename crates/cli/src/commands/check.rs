use std::path::Path;

use herald_provider::{EmailPlugin, Plugin};
use herald_smtp::SmtpEmailPlugin;

use crate::config::HeraldConfig;

pub async fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = HeraldConfig::load(config_path)?;
    let server = format!("{}:{}", config.smtp.smtp_server, config.smtp.smtp_port);
    let plugin = SmtpEmailPlugin::new(config.smtp)?;

    match plugin.health_check().await {
        Ok(()) => {
            println!("{} can reach {server}.", plugin.metadata().title);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to reach {server}: {e}");
            std::process::exit(1);
        }
    }
}
