//! Bounded fan-out over a batch of creature ids.
use std::time::Instant;

use catalog_core::{CatalogStore, CreatureView, EntityId};
use catalog_provider::DataProvider;
use futures::StreamExt;
use futures::stream;
use tokio_util::sync::CancellationToken;

use crate::config::{ErrorPolicy, PipelineConfig};
use crate::error::{AggregateError, EntityFailure, ResolveError};
use crate::resolve::{resolve_creature, resolve_details};

/// Outcome of a successful aggregation run.
///
/// `views` follows the order of the requested ids; failed ids are missing
/// from it and listed in `failures` (always empty under
/// [`ErrorPolicy::AllOrNothing`]).
#[derive(Debug, Default)]
pub struct AggregationReport {
    pub views: CatalogStore,
    pub failures: Vec<EntityFailure>,
}

impl AggregationReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The aggregation pipeline.
///
/// Holds no state between runs; calling [`Aggregator::aggregate`] twice
/// against a stable provider yields identical views.
pub struct Aggregator<P> {
    provider: P,
    config: PipelineConfig,
}

impl<P> Aggregator<P>
where
    P: DataProvider,
{
    pub fn new(provider: P, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve every id in `ids`.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::AllOrNothing`], the first creature to fail (in
    /// completion order) aborts the run with [`AggregateError::Entity`].
    pub async fn aggregate(&self, ids: &[EntityId]) -> Result<AggregationReport, AggregateError> {
        self.aggregate_with_cancel(ids, &CancellationToken::new())
            .await
    }

    /// [`Aggregator::aggregate`], abandoning in-flight lookups once `cancel`
    /// fires.
    pub async fn aggregate_with_cancel(
        &self,
        ids: &[EntityId],
        cancel: &CancellationToken,
    ) -> Result<AggregationReport, AggregateError> {
        let started = Instant::now();
        let limit = self.config.concurrency.max(1);
        tracing::info!(
            "Aggregating {} creatures via {} (locale={}, concurrency={}, policy={})",
            ids.len(),
            self.provider.name(),
            self.config.locale,
            limit,
            self.config.error_policy
        );

        let mut pending = stream::iter(ids.iter().copied().enumerate())
            .map(|(index, id)| {
                let provider = &self.provider;
                let config = &self.config;
                async move { (index, id, resolve_creature(provider, id, config).await) }
            })
            .buffer_unordered(limit);

        // Completion order is arbitrary; slots keep rows aligned with `ids`.
        let mut slots: Vec<Option<CreatureView>> = Vec::with_capacity(ids.len());
        slots.resize_with(ids.len(), || None);
        let mut failures: Vec<(usize, EntityFailure)> = Vec::new();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("Aggregation cancelled after {:?}", started.elapsed());
                    return Err(AggregateError::Cancelled);
                }
                next = pending.next() => next,
            };

            let Some((index, id, result)) = next else {
                break;
            };

            match result {
                Ok(view) => slots[index] = Some(view),
                Err(error) => match self.config.error_policy {
                    ErrorPolicy::AllOrNothing => {
                        tracing::debug!("Creature {} failed, aborting run: {}", id, error);
                        return Err(AggregateError::Entity { id, source: error });
                    }
                    ErrorPolicy::Partial => {
                        tracing::warn!("Creature {} failed: {}", id, error);
                        failures.push((index, EntityFailure { id, error }));
                    }
                },
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        let report = AggregationReport {
            views: slots.into_iter().flatten().collect(),
            failures: failures.into_iter().map(|(_, failure)| failure).collect(),
        };

        tracing::info!(
            "Aggregated {} creatures ({} failed) in {:?}",
            report.views.len(),
            report.failures.len(),
            started.elapsed()
        );
        Ok(report)
    }

    /// Detail card for one creature in the configured locale.
    pub async fn resolve_details(&self, id: EntityId) -> Result<CreatureView, ResolveError> {
        resolve_details(&self.provider, id, &self.config.locale).await
    }
}

/// All-or-nothing aggregation with default settings and `locale`.
pub async fn aggregate<P>(
    provider: P,
    ids: &[EntityId],
    locale: &str,
) -> Result<CatalogStore, AggregateError>
where
    P: DataProvider,
{
    let config = PipelineConfig::default().with_locale(locale);
    let report = Aggregator::new(provider, config).aggregate(ids).await?;
    Ok(report.views)
}
