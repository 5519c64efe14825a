//! Provider document shapes.
//!
//! Only the fields the catalog consumes are modeled; unknown fields are
//! ignored by serde, so provider additions never break decoding. Fields the
//! catalog cannot do without (`id`, `name`, reference urls) are required.

use serde::{Deserialize, Serialize};

/// `{ name, url }` pair the provider uses to link documents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id in the last non-empty path segment of `url`.
    ///
    /// `https://pokeapi.co/api/v2/pokemon-species/4/` yields `Some(4)`.
    pub fn trailing_id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// Bare `{ url }` link (the species document's evolution chain reference).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

/// Base document for one creature (`/pokemon/{id}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityDoc {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: SpriteDoc,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    pub species: NamedRef,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDoc {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedRef,
}

/// Localization and lineage document (`/pokemon-species/{id}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesDoc {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    pub evolution_chain: UrlRef,
}

/// Stat label document (`/stat/{id}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDoc {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedRef,
}

/// Evolution tree document (`/evolution-chain/{id}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChainDoc {
    pub chain: ChainLink,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedRef,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    pub fn leaf(species: NamedRef) -> Self {
        Self {
            species,
            evolves_to: Vec::new(),
        }
    }

    pub fn with_children(species: NamedRef, evolves_to: Vec<ChainLink>) -> Self {
        Self {
            species,
            evolves_to,
        }
    }
}
