use anyhow::Context;
use clap::Parser;
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};
use stringscope::{CliOverrides, RecordStore, ServiceConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Number of runtime worker threads
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
            worker_threads: self.threads,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServiceConfig::load_from(cli.config.as_deref())?.merge_with_cli(cli.overrides());

    init_tracing(&config.log_level);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads.get())
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(serve(config))
}

/// `RUST_LOG` takes precedence over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let store = Arc::new(RecordStore::new());
    let app = routes::router(Arc::clone(&store));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(
        "Listening on {} with {} worker threads",
        address, config.worker_threads
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down with {} stored strings", store.len());
    store.metrics().log_stats();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
