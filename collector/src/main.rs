//! Status Collector Server Entry Point

use std::process::ExitCode;

use clap::Parser;
use status_collector::cli::Cli;
use status_collector::collector::StatusCollector;
use status_collector::error::CollectorResult;
use status_collector::{logging, server, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Status collector terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CollectorResult<()> {
    let config = cli.resolve_config()?;
    let collector = StatusCollector::from_config(&config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        providers = collector.registry().len(),
        request_timeout_secs = config.request_timeout_secs,
        page_timeout_secs = config.page_timeout_secs,
        "Starting status collector"
    );

    let state = AppState::new(collector)?;
    server::run(state, &config.bind_addr()).await
}
