//! Token Issuer binary: issues the local token and answers verification requests on stdin.

use anyhow::Context;
use token_issuer::{init_tracing, issue_token, serve_checks, service_span, Config};
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.tracing);

    let span = service_span(&config.tracing);
    run(config).instrument(span).await
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!(token_file = %config.token_file, "Starting Token Issuer");

    let mut authority = config.authority();
    issue_token(&mut authority)
        .await
        .context("Failed to issue token")?;

    info!("Reading candidates from stdin");

    tokio::select! {
        result = serve_checks(&authority, BufReader::new(stdin()), stdout()) => {
            let stats = result.context("Verification loop failed")?;
            info!(accepted = stats.accepted, denied = stats.denied, "Input closed, shutting down");
        }
        () = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
