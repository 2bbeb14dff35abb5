use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use herald_core::{DeliveryReport, Notification};
use herald_provider::{ConsolePlugin, EmailPlugin, Instrumented, Plugin, PluginMetricsSnapshot};
use herald_smtp::SmtpEmailPlugin;
use serde::Serialize;

use crate::config::HeraldConfig;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Path to a JSON file holding the notification.
    #[arg(long)]
    pub payload: PathBuf,
    /// Log the notification instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct SendOutput {
    plugin: &'static str,
    report: DeliveryReport,
    metrics: PluginMetricsSnapshot,
}

pub async fn run(config_path: &Path, args: &SendArgs) -> anyhow::Result<()> {
    let notification = read_notification(&args.payload)?;

    let plugin = if args.dry_run {
        Instrumented::new(ConsolePlugin::new())
    } else {
        let config = HeraldConfig::load(config_path)?;
        Instrumented::new(SmtpEmailPlugin::new(config.smtp)?)
    };
    let metrics = plugin.metrics();

    let report = plugin.send(&notification).await?;
    let output = SendOutput {
        plugin: plugin.metadata().slug,
        report,
        metrics: metrics.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if !report.delivered {
        eprintln!(
            "Notification {} was not delivered after {} attempt(s).",
            notification.id, report.attempts
        );
        std::process::exit(1);
    }
    Ok(())
}

fn read_notification(path: &Path) -> anyhow::Result<Notification> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload {}", path.display()))?;
    parse_notification(&content)
        .with_context(|| format!("invalid notification in {}", path.display()))
}

fn parse_notification(content: &str) -> anyhow::Result<Notification> {
    Ok(serde_json::from_str(content)?)
}
