//! Command-line front end for the creature catalog.
//!
//! One run aggregates the configured id range, applies the search/sort
//! query, prints the list and optionally one detail card. All knobs come from
//! the environment (see [`ClientConfig::from_env`]).
pub mod config;
pub mod logging;
pub mod render;

use std::io::Write;

use anyhow::{Context, Result};
use catalog_provider::DataProvider;
use pipeline::{Aggregator, CancellationToken};

pub use config::{ClientConfig, OutputFormat};

/// Aggregate, query and print one catalog to `out`.
pub async fn run<P, W>(
    aggregator: &Aggregator<P>,
    config: &ClientConfig,
    cancel: &CancellationToken,
    out: &mut W,
) -> Result<()>
where
    P: DataProvider,
    W: Write,
{
    let ids = config.range.to_vec();
    let report = aggregator
        .aggregate_with_cancel(&ids, cancel)
        .await
        .context("Failed to load the catalog")?;

    if !report.is_complete() {
        tracing::warn!(
            "{} of {} creatures could not be loaded",
            report.failures.len(),
            ids.len()
        );
    }

    let rows = report.views.query(&config.query);
    tracing::debug!("{} creatures match {:?}", rows.len(), config.query);

    match config.output {
        OutputFormat::Text => render::write_list(out, rows.iter().copied())?,
        OutputFormat::Json => render::write_json(out, rows.iter().copied())?,
    }

    if let Some(id) = config.detail {
        let mut view = aggregator
            .resolve_details(id)
            .await
            .with_context(|| format!("Failed to load details for {}", id))?;
        // The card reuses the chain already resolved for the list, if any.
        if let Some(listed) = report.views.get(id) {
            view.evolutions = listed.evolutions.clone();
        }
        writeln!(out)?;
        writeln!(out, "{}", render::detail_card(&view, config.sprite))?;
    }

    Ok(())
}
