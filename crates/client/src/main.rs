//! `pokedex` entry point.
use anyhow::Result;
use catalog_provider::HttpProvider;
use pipeline::{Aggregator, CancellationToken};
use pokedex_client::{ClientConfig, logging, run};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let provider = HttpProvider::new(config.http.clone())?;
    let aggregator = Aggregator::new(provider, config.pipeline.clone());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(&aggregator, &config, &cancel, &mut stdout).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
