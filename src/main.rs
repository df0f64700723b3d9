//! Cluster status server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cluster_status::api::{create_router, AppState};
use cluster_status::cluster::ClusterState;
use cluster_status::config::Config;
use cluster_status::metrics;
use cluster_status::utils::shutdown_signal;

/// Cluster status server.
#[derive(Parser, Debug)]
#[command(name = "cluster-status")]
#[command(about = "Serves cluster membership and service registrations over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON snapshot to seed cluster state from (overrides SNAPSHOT_PATH).
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the status pages (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let config = load_config(&args)?;

    // Initialize logging
    let filter = if config.verbose {
        EnvFilter::new("cluster_status=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load()?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(snapshot) = &args.snapshot {
        config.snapshot_path = Some(snapshot.clone());
    }
    config.verbose |= args.verbose;

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CLUSTER STATUS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    if let Some(path) = &config.snapshot_path {
        print!("Loading snapshot... ");
        match ClusterState::load_snapshot(path) {
            Ok(state) => {
                println!("OK");
                println!("  Members: {}", state.member_count());
                println!("  Services: {}", state.service_count());
            }
            Err(e) => {
                println!("FAILED");
                println!("  Error: {}", e);
                return Err(anyhow::anyhow!("Snapshot load failed"));
            }
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.listen_addr());
    match config.metrics_addr() {
        Some(addr) => println!("  Metrics: {}", addr),
        None => println!("  Metrics: Disabled"),
    }
    match &config.snapshot_path {
        Some(path) => println!("  Snapshot: {}", path.display()),
        None => println!("  Snapshot: None (empty cluster)"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the status pages until shutdown.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Initialize metrics
    metrics::init_metrics();
    if let Some(addr) = config.metrics_addr() {
        metrics::install_exporter(addr)?;
    }

    let cluster = match &config.snapshot_path {
        Some(path) => ClusterState::load_snapshot(path)?,
        None => {
            warn!("No snapshot configured, serving an empty cluster");
            ClusterState::new()
        }
    };

    let app_state = AppState::from_cluster(Arc::new(cluster));
    let router = create_router(app_state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
