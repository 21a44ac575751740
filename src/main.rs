use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fitness_loadtest::{Config, CredentialPool, Dispatcher, HttpRecordClient, TaskRunner};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    info!("════════════════════════════════════════════════════════════");
    info!("           FITNESS RECORD LOAD TEST");
    info!("════════════════════════════════════════════════════════════");
    info!("Endpoint: {}", config.endpoint);
    info!("Workers: {}", config.workers);
    info!("Request timeout: {}s", config.timeout_secs);
    info!("Record type: {:?}", config.record_type);

    let credentials = CredentialPool::load_from_file(&config.token_file)
        .context("Failed to load login tokens")?;

    info!("Tokens: {}", credentials.len());
    info!("════════════════════════════════════════════════════════════");

    let client = HttpRecordClient::new(config.endpoint.clone(), config.timeout())?;
    let runner = TaskRunner::new(Arc::new(client), config.timeout(), config.record_type);
    let dispatcher = Dispatcher::new(runner, config.workers as usize)?;

    let summary = dispatcher.run(credentials).await?;
    summary.print();

    if let Some(path) = &config.summary_file {
        summary
            .write_json(path)
            .context("Failed to write run summary")?;
    }

    info!("════════════════════════════════════════════════════════════");
    info!("                 LOAD TEST COMPLETE");
    info!("════════════════════════════════════════════════════════════");

    Ok(())
}
