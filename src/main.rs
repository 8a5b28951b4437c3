use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netprobe::config::{self, MonitorConfig};
use netprobe::lifecycle::{signals, Shutdown};
use netprobe::monitor::Monitor;
use netprobe::probe::HttpProbe;
use netprobe::sink::{AuditLog, DesktopNotifier, TracingLabel};

#[derive(Parser, Debug)]
#[command(name = "netprobe")]
#[command(about = "Background internet reachability monitor with downtime tracking")]
struct Args {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "netprobe.toml")]
    config: PathBuf,

    /// Override the audit log path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Override the reachability probe endpoint
    #[arg(long)]
    probe_url: Option<String>,

    /// Start with monitoring disabled
    #[arg(long)]
    start_disabled: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netprobe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("netprobe v0.1.0 starting");

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(error) => {
            // The audit log keeps a record of failed launches too.
            let audit = AuditLog::new(
                args.log_file
                    .clone()
                    .unwrap_or_else(|| MonitorConfig::default().log.path),
            );
            audit
                .append_lossy(&format!("netprobe failed to start: {error}"))
                .await;
            return Err(error);
        }
    };

    tracing::info!(
        probe_url = %config.probe.url,
        log_path = %config.log.path.display(),
        notifications = config.notifications.enabled,
        start_enabled = config.monitoring.start_enabled,
        "Configuration loaded"
    );

    let audit = AuditLog::new(config.log.path.clone());
    let probe = HttpProbe::new(&config.probe)?;
    let events = Arc::new(DesktopNotifier::new(
        config.notifications.enabled,
        config.notifications.app_name.clone(),
    ));
    let label = Arc::new(TracingLabel);

    let shutdown = Shutdown::new();
    let (monitor, handle) = Monitor::new(
        probe,
        events,
        label,
        audit.clone(),
        config.monitoring.start_enabled,
    );
    let monitor_task = tokio::spawn(monitor.run(shutdown.subscribe()));

    signals::spawn_operator_signals(handle);
    audit.append_lossy("netprobe initialized").await;

    signals::wait_for_interrupt().await;
    tracing::info!("interrupt received, shutting down");
    shutdown.trigger();
    let _ = monitor_task.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Load the config file and apply command-line overrides.
fn load_config(args: &Args) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    let mut config = config::load_or_default(&args.config)?;

    if let Some(path) = &args.log_file {
        config.log.path = path.clone();
    }
    if let Some(url) = &args.probe_url {
        config.probe.url = url.clone();
    }
    if args.start_disabled {
        config.monitoring.start_enabled = false;
    }

    // Overrides bypass the loader, so validate the final shape again.
    config::validation::validate_config(&config)
        .map_err(config::ConfigError::Validation)?;

    Ok(config)
}
