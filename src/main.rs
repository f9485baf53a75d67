//! VNX Exporter binary
//!
//! Polls a VNX storage array through `naviseccli` and serves the results
//! as Prometheus gauges.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};
use vnx_exporter::{
    metrics::DEFAULT_MAX_LUNS, navi::DEFAULT_NAVISECCLI_PATH, start_web_server, ExporterMetrics,
    LunCountPoller, NaviCliConfig, ShellRunner, StoragePoolPoller, WebConfig,
    DEFAULT_INTERVAL_SECS,
};

#[derive(Parser)]
#[command(name = "vnx_exporter")]
#[command(about = "Prometheus exporter for VNX storage pools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Periodically runs naviseccli against a VNX manager and exposes pool capacity and LUN usage as Prometheus gauges")]
struct Cli {
    /// The address to listen on for HTTP requests
    #[arg(long, default_value = ":9184")]
    listen_address: String,

    /// The address of the VNX manager
    #[arg(long, default_value = "10.10.10.10")]
    storage: String,

    /// The user used to access the VNX manager
    #[arg(long, default_value = "user")]
    user: String,

    /// The password used to access the VNX manager
    #[arg(long, default_value = "password", hide_default_value = true)]
    password: String,

    /// The pool name on the VNX manager
    #[arg(long, default_value = "pool")]
    poolname: String,

    /// Path to the naviseccli binary
    #[arg(long, default_value = DEFAULT_NAVISECCLI_PATH)]
    naviseccli: String,

    /// naviseccli login scope (0 = global, 1 = local, 2 = LDAP)
    #[arg(long, default_value_t = 0)]
    scope: u8,

    /// Seconds between two polls of the array
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Value reported by the maximum LUN gauge
    #[arg(long, default_value_t = DEFAULT_MAX_LUNS)]
    max_luns: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(cli_level(cli), rust_log.as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn cli_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// The CLI level is the default directive; `RUST_LOG` directives refine it.
fn log_filter(level: Level, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(rust_log.unwrap_or_default())
}

/// Start both pollers and the HTTP server; return when any of them fails.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let web_config = WebConfig::from_listen_address(&cli.listen_address)?;
    let navi = NaviCliConfig::new(&cli.storage, &cli.user, &cli.password, &cli.poolname)
        .with_binary(&cli.naviseccli)
        .with_scope(cli.scope);
    let interval = Duration::from_secs(cli.interval);

    info!("Starting VNX exporter...");
    info!("  - Manager: {}", navi.host);
    info!("  - Pool: {}", navi.pool_name);
    info!("  - Poll interval: {}s", cli.interval);

    let metrics = Arc::new(ExporterMetrics::new()?);
    metrics.set_max_luns(cli.max_luns);

    let runner = Arc::new(ShellRunner::new());

    let pool_poller = StoragePoolPoller::new(
        Arc::clone(&runner),
        navi.storage_pool_command(),
        Arc::clone(&metrics),
    )
    .with_interval(interval);

    let lun_poller = LunCountPoller::new(runner, navi.lun_count_command(), Arc::clone(&metrics))
        .with_interval(interval);

    let mut pool_task = tokio::spawn(pool_poller.run());
    let mut lun_task = tokio::spawn(lun_poller.run());

    // Every branch only completes on failure; the first one ends the process.
    tokio::select! {
        result = &mut pool_task => {
            result.context("storage pool poller panicked")?.context("storage pool poll failed")?;
        }
        result = &mut lun_task => {
            result.context("LUN count poller panicked")?.context("LUN count poll failed")?;
        }
        result = start_web_server(web_config, metrics) => {
            result.context("web server failed")?;
        }
    }

    Ok(())
}
