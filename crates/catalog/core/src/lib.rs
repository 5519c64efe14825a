//! Domain types for the creature catalog.
//!
//! `catalog-core` holds everything about the catalog that does not touch the
//! network: the shapes of the provider documents, the display-ready
//! [`CreatureView`], localization lookup, evolution chain flattening and the
//! [`CatalogStore`] with its pure search/sort queries. The provider and
//! pipeline crates build on the types re-exported here.
pub mod document;
pub mod evolution;
pub mod id;
pub mod locale;
pub mod store;
pub mod view;

pub use document::{
    ChainLink, EntityDoc, EvolutionChainDoc, FlavorTextEntry, LocalizedName, NamedRef, SpeciesDoc,
    SpriteDoc, StatDoc, StatSlot, TypeSlot, UrlRef,
};
pub use evolution::{ChainError, MAX_CHAIN_DEPTH, flatten_chain};
pub use id::{EntityId, EntityRange, IdError};
pub use locale::{DEFAULT_LOCALE, Localized, localize_or, lookup, normalize_flavor_text};
pub use store::{CatalogQuery, CatalogStore, SortKey, collate};
pub use view::{
    CreatureView, SPRITE_BASE_URL, SpriteVariant, Sprites, StatView, evolution_sprite_url,
    type_color,
};
