//! Display-ready creature records.
use serde::Serialize;

use crate::document::{EntityDoc, NamedRef, SpriteDoc};
use crate::id::EntityId;

/// Base url for the per-species artwork shown in evolution strips.
pub const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Fully joined creature record assembled by the aggregation pipeline.
///
/// `id` is fixed at construction; enrichment only touches display fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatureView {
    id: EntityId,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub sprites: Sprites,
    pub types: Vec<String>,
    pub stats: Vec<StatView>,
    pub flavor_text: Option<String>,
    pub evolutions: Vec<NamedRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatView {
    pub label: String,
    pub base_value: u32,
    /// Url of the stat document the label was resolved from.
    #[serde(skip)]
    pub source: String,
}

impl CreatureView {
    /// Unenriched view carrying the provider's own names.
    pub fn new(id: EntityId, entity: EntityDoc) -> Self {
        Self {
            id,
            name: entity.name,
            height: entity.height,
            weight: entity.weight,
            sprites: Sprites::from(entity.sprites),
            types: entity.types.into_iter().map(|slot| slot.kind.name).collect(),
            stats: entity
                .stats
                .into_iter()
                .map(|slot| StatView {
                    label: slot.stat.name,
                    base_value: slot.base_stat,
                    source: slot.stat.url,
                })
                .collect(),
            flavor_text: None,
            evolutions: Vec::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }

    /// Card colour hint keyed by the primary type.
    pub fn color(&self) -> &'static str {
        type_color(self.primary_type().unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

impl From<SpriteDoc> for Sprites {
    fn from(doc: SpriteDoc) -> Self {
        Self {
            front_default: doc.front_default,
            front_shiny: doc.front_shiny,
        }
    }
}

impl Sprites {
    /// Image for the requested variant. Shiny falls back to the default art
    /// when the provider has none.
    pub fn select(&self, variant: SpriteVariant) -> Option<&str> {
        match variant {
            SpriteVariant::Default => self.front_default.as_deref(),
            SpriteVariant::Shiny => self
                .front_shiny
                .as_deref()
                .or(self.front_default.as_deref()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpriteVariant {
    #[default]
    Default,
    Shiny,
}

impl SpriteVariant {
    /// The long-press toggle on the detail card.
    pub fn toggled(self) -> Self {
        match self {
            SpriteVariant::Default => SpriteVariant::Shiny,
            SpriteVariant::Shiny => SpriteVariant::Default,
        }
    }
}

/// Hex colour for a type tag; unknown tags get a neutral grey.
pub fn type_color(tag: &str) -> &'static str {
    match tag {
        "fire" => "#FFA07A",
        "water" => "#1E90FF",
        "grass" => "#98FB98",
        _ => "#E0E0E0",
    }
}

/// Artwork url for a species reference from an evolution chain.
pub fn evolution_sprite_url(species: &NamedRef) -> Option<String> {
    species
        .trailing_id()
        .map(|id| format!("{SPRITE_BASE_URL}/{id}.png"))
}
