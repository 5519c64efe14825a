//! The remote data provider seam.
//!
//! Any backend that serves the document shapes in [`catalog_core::document`]
//! can stand behind [`DataProvider`]; the pipeline never sees urls beyond the
//! ones the documents themselves carry.

use async_trait::async_trait;
use catalog_core::{EntityId, EntityDoc, EvolutionChainDoc, SpeciesDoc, StatDoc};

use crate::error::Result;

/// Read-only access to the provider's documents.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Base document for a creature.
    async fn fetch_entity(&self, id: EntityId) -> Result<EntityDoc>;

    /// Species document behind an entity's `species.url`.
    async fn fetch_species(&self, url: &str) -> Result<SpeciesDoc>;

    /// Species document looked up by creature id instead of by link.
    async fn fetch_species_by_id(&self, id: EntityId) -> Result<SpeciesDoc>;

    /// Stat document behind a `stats[].stat.url`.
    async fn fetch_stat(&self, url: &str) -> Result<StatDoc>;

    /// Evolution tree behind a species' `evolution_chain.url`.
    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainDoc>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}

#[async_trait]
impl<P> DataProvider for std::sync::Arc<P>
where
    P: DataProvider + ?Sized,
{
    async fn fetch_entity(&self, id: EntityId) -> Result<EntityDoc> {
        (**self).fetch_entity(id).await
    }

    async fn fetch_species(&self, url: &str) -> Result<SpeciesDoc> {
        (**self).fetch_species(url).await
    }

    async fn fetch_species_by_id(&self, id: EntityId) -> Result<SpeciesDoc> {
        (**self).fetch_species_by_id(id).await
    }

    async fn fetch_stat(&self, url: &str) -> Result<StatDoc> {
        (**self).fetch_stat(url).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainDoc> {
        (**self).fetch_evolution_chain(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
