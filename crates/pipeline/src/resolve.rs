//! Per-creature resolution: the dependent lookups behind one view.
use catalog_core::{
    CreatureView, EntityDoc, EntityId, SpeciesDoc, StatView, flatten_chain, localize_or, lookup,
    normalize_flavor_text,
};
use catalog_provider::{DataProvider, ProviderError};
use futures::future::{try_join, try_join_all};

use crate::config::{PipelineConfig, SpeciesLookup};
use crate::error::ResolveError;

/// Resolve one creature into a fully joined view.
///
/// Lookups, in dependency order:
/// 1. entity document by id
/// 2. species document and every stat document, concurrently
/// 3. evolution chain, via the species link or a second species lookup by id
pub async fn resolve_creature<P>(
    provider: &P,
    id: EntityId,
    config: &PipelineConfig,
) -> Result<CreatureView, ResolveError>
where
    P: DataProvider + ?Sized,
{
    tracing::debug!("Resolving creature {}", id);
    let locale = config.locale.as_str();

    let entity = fetch_entity(provider, id).await?;
    let species_url = entity.species.url.clone();
    let mut view = CreatureView::new(id, entity);

    let (species, labels) = try_join(
        provider.fetch_species(&species_url),
        localized_stat_labels(provider, &view.stats, locale),
    )
    .await?;

    apply_species(&mut view, &species, locale);
    apply_stat_labels(&mut view, labels);

    let chain_url = match config.species_lookup {
        SpeciesLookup::Reuse => species.evolution_chain.url,
        SpeciesLookup::Refetch => provider.fetch_species_by_id(id).await?.evolution_chain.url,
    };
    let chain = provider.fetch_evolution_chain(&chain_url).await?;
    view.evolutions = flatten_chain(&chain.chain)?;

    tracing::debug!(
        "Resolved creature {} as {:?} ({} evolutions)",
        id,
        view.name,
        view.evolutions.len()
    );
    Ok(view)
}

/// Resolve the detail card for one creature: localized name and stat labels
/// only. Flavor text and evolutions are left empty.
pub async fn resolve_details<P>(
    provider: &P,
    id: EntityId,
    locale: &str,
) -> Result<CreatureView, ResolveError>
where
    P: DataProvider + ?Sized,
{
    tracing::debug!("Resolving details for creature {}", id);

    let entity = fetch_entity(provider, id).await?;
    let species_url = entity.species.url.clone();
    let mut view = CreatureView::new(id, entity);

    let (species, labels) = try_join(
        provider.fetch_species(&species_url),
        localized_stat_labels(provider, &view.stats, locale),
    )
    .await?;

    view.name = localize_or(&species.names, locale, &view.name);
    apply_stat_labels(&mut view, labels);
    Ok(view)
}

async fn fetch_entity<P>(provider: &P, id: EntityId) -> Result<EntityDoc, ResolveError>
where
    P: DataProvider + ?Sized,
{
    let entity = provider.fetch_entity(id).await?;
    if entity.id != id.get() {
        return Err(ResolveError::IdMismatch {
            requested: id,
            returned: entity.id,
        });
    }
    Ok(entity)
}

/// Localized label for every stat, in stat order. Stats without a matching
/// entry keep their provider name.
async fn localized_stat_labels<P>(
    provider: &P,
    stats: &[StatView],
    locale: &str,
) -> Result<Vec<String>, ProviderError>
where
    P: DataProvider + ?Sized,
{
    try_join_all(stats.iter().map(|stat| async move {
        let doc = provider.fetch_stat(&stat.source).await?;
        Ok::<_, ProviderError>(localize_or(&doc.names, locale, &stat.label))
    }))
    .await
}

fn apply_species(view: &mut CreatureView, species: &SpeciesDoc, locale: &str) {
    if let Some(name) = lookup(&species.names, locale) {
        view.name = name.to_string();
    }
    view.flavor_text = lookup(&species.flavor_text_entries, locale).map(normalize_flavor_text);
}

fn apply_stat_labels(view: &mut CreatureView, labels: Vec<String>) {
    for (stat, label) in view.stats.iter_mut().zip(labels) {
        stat.label = label;
    }
}
