//! In-memory provider for tests.
//!
//! Documents are stored as JSON values keyed by url and decoded on every
//! fetch, so malformed documents surface as [`ProviderError::Decode`] the
//! same way they would over HTTP. Failures and delays can be scripted per url
//! and every request is recorded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use catalog_core::{
    ChainLink, EntityDoc, EntityId, EvolutionChainDoc, FlavorTextEntry, LocalizedName, NamedRef,
    SpeciesDoc, SpriteDoc, StatDoc, StatSlot, TypeSlot, UrlRef,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoints::Endpoints;
use crate::error::{ProviderError, Result};
use crate::traits::DataProvider;

#[derive(Default)]
struct MockState {
    documents: HashMap<String, Value>,
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requests: Vec<String>,
}

/// Mock provider serving seeded documents without network.
#[derive(Clone)]
pub struct MockProvider {
    endpoints: Endpoints,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serve `document` at `url`.
    pub fn insert<T: Serialize>(&self, url: impl Into<String>, document: &T) -> &Self {
        let value = serde_json::to_value(document).unwrap_or_default();
        self.insert_raw(url, value)
    }

    /// Serve an arbitrary JSON value at `url`, e.g. a malformed document.
    pub fn insert_raw(&self, url: impl Into<String>, value: Value) -> &Self {
        self.state().documents.insert(url.into(), value);
        self
    }

    /// Make every request to `url` fail with [`ProviderError::Unavailable`].
    pub fn fail(&self, url: impl Into<String>, reason: impl Into<String>) -> &Self {
        self.state().failures.insert(url.into(), reason.into());
        self
    }

    /// Remove a scripted failure.
    pub fn heal(&self, url: &str) -> &Self {
        self.state().failures.remove(url);
        self
    }

    /// Hold every response from `url` for `delay`.
    pub fn delay(&self, url: impl Into<String>, delay: Duration) -> &Self {
        self.state().delays.insert(url.into(), delay);
        self
    }

    /// Urls requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.state().requests.iter().filter(|r| *r == url).count()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    /// Seed every document one creature needs: entity, species, stats and
    /// evolution chain. Stat documents already present are left alone, so
    /// creatures can share them.
    pub fn seed(&self, creature: &CreatureFixture) -> &Self {
        let endpoints = self.endpoints.clone();
        let id = creature.id;
        let species_url = endpoints.species(id);
        let chain_url = endpoints.evolution_chain(creature.chain_id);

        let entity = EntityDoc {
            id: id.get(),
            name: creature.name.clone(),
            height: creature.height,
            weight: creature.weight,
            sprites: SpriteDoc {
                front_default: Some(format!("https://sprites.test/{}.png", id.get())),
                front_shiny: Some(format!("https://sprites.test/shiny/{}.png", id.get())),
            },
            types: creature
                .types
                .iter()
                .enumerate()
                .map(|(index, tag)| TypeSlot {
                    slot: index as u8 + 1,
                    kind: NamedRef::new(tag.clone(), format!("{}/type/{}/", endpoints.base(), tag)),
                })
                .collect(),
            stats: creature
                .stats
                .iter()
                .map(|stat| StatSlot {
                    base_stat: stat.base_value,
                    stat: NamedRef::new(stat.name.clone(), endpoints.stat(stat.id)),
                })
                .collect(),
            species: NamedRef::new(creature.name.clone(), species_url.clone()),
        };

        let species = SpeciesDoc {
            names: creature
                .names
                .iter()
                .map(|(lang, text)| localized_name(lang, text))
                .collect(),
            flavor_text_entries: creature
                .flavor_texts
                .iter()
                .map(|(lang, text)| FlavorTextEntry {
                    flavor_text: text.clone(),
                    language: language(lang),
                })
                .collect(),
            evolution_chain: UrlRef {
                url: chain_url.clone(),
            },
        };

        self.insert(endpoints.entity(id), &entity);
        self.insert(species_url, &species);
        if let Some(chain) = &creature.chain {
            self.insert(chain_url, &EvolutionChainDoc { chain: chain.clone() });
        }

        for stat in &creature.stats {
            let url = endpoints.stat(stat.id);
            let mut state = self.state();
            if !state.documents.contains_key(&url) {
                let doc = StatDoc {
                    names: stat
                        .labels
                        .iter()
                        .map(|(lang, text)| localized_name(lang, text))
                        .collect(),
                };
                state
                    .documents
                    .insert(url, serde_json::to_value(&doc).unwrap_or_default());
            }
        }

        self
    }

    async fn decode<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let (delay, failure, document) = {
            let mut state = self.state();
            state.requests.push(url.to_string());
            (
                state.delays.get(url).copied(),
                state.failures.get(url).cloned(),
                state.documents.get(url).cloned(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(reason) = failure {
            return Err(ProviderError::Unavailable {
                url: url.to_string(),
                reason,
            });
        }

        let document = document.ok_or_else(|| ProviderError::NotFound {
            url: url.to_string(),
        })?;

        serde_json::from_value(document).map_err(|source| ProviderError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn fetch_entity(&self, id: EntityId) -> Result<EntityDoc> {
        self.decode(&self.endpoints.entity(id)).await
    }

    async fn fetch_species(&self, url: &str) -> Result<SpeciesDoc> {
        self.decode(url).await
    }

    async fn fetch_species_by_id(&self, id: EntityId) -> Result<SpeciesDoc> {
        self.decode(&self.endpoints.species(id)).await
    }

    async fn fetch_stat(&self, url: &str) -> Result<StatDoc> {
        self.decode(url).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainDoc> {
        self.decode(url).await
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn language(lang: &str) -> NamedRef {
    NamedRef::new(lang, format!("https://pokeapi.co/api/v2/language/{lang}/"))
}

fn localized_name(lang: &str, text: &str) -> LocalizedName {
    LocalizedName {
        name: text.to_string(),
        language: language(lang),
    }
}

/// One stat on a [`CreatureFixture`].
#[derive(Clone, Debug)]
pub struct StatFixture {
    pub id: u32,
    pub name: String,
    pub base_value: u32,
    pub labels: Vec<(String, String)>,
}

/// Everything needed to seed one creature into a [`MockProvider`].
#[derive(Clone, Debug)]
pub struct CreatureFixture {
    pub id: EntityId,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<String>,
    pub names: Vec<(String, String)>,
    pub flavor_texts: Vec<(String, String)>,
    pub stats: Vec<StatFixture>,
    pub chain_id: u32,
    pub chain: Option<ChainLink>,
}

impl CreatureFixture {
    /// A creature alone in its own single-node chain, with no stats and no
    /// localized strings.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        let name = name.into();
        let species = NamedRef::new(name.clone(), Endpoints::default().species(id));
        Self {
            id,
            name,
            height: 10,
            weight: 100,
            types: Vec::new(),
            names: Vec::new(),
            flavor_texts: Vec::new(),
            stats: Vec::new(),
            chain_id: id.get(),
            chain: Some(ChainLink::leaf(species)),
        }
    }

    pub fn typed(mut self, tag: impl Into<String>) -> Self {
        self.types.push(tag.into());
        self
    }

    pub fn named(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.names.push((lang.into(), text.into()));
        self
    }

    pub fn flavor(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.flavor_texts.push((lang.into(), text.into()));
        self
    }

    pub fn stat(mut self, stat: StatFixture) -> Self {
        self.stats.push(stat);
        self
    }

    /// Link to chain `chain_id`; `chain` of `None` leaves the chain document
    /// to be seeded separately (or shared with another creature).
    pub fn chain(mut self, chain_id: u32, chain: Option<ChainLink>) -> Self {
        self.chain_id = chain_id;
        self.chain = chain;
        self
    }
}

impl StatFixture {
    pub fn new(id: u32, name: impl Into<String>, base_value: u32) -> Self {
        Self {
            id,
            name: name.into(),
            base_value,
            labels: Vec::new(),
        }
    }

    pub fn label(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.labels.push((lang.into(), text.into()));
        self
    }
}

/// Species reference as the default endpoints would link it.
pub fn species_ref(name: &str, id: u32) -> NamedRef {
    NamedRef::new(
        name,
        format!("{}/pokemon-species/{}/", Endpoints::default().base(), id),
    )
}
