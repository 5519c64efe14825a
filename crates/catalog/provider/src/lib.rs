//! Remote data provider abstraction for the creature catalog.
//!
//! # Architecture
//!
//! ```text
//! DataProvider (trait)
//!   ├── HttpProvider   reqwest + PokeAPI url layout
//!   └── MockProvider   in-memory documents (feature = "mock")
//! ```
//!
//! The provider is a read-only collaborator: it hands back typed documents
//! and classifies failures as transport or decode errors. Localization,
//! flattening and joining happen in the pipeline.
//!
//! # Usage
//!
//! ```ignore
//! use catalog_provider::{DataProvider, HttpConfig, HttpProvider};
//!
//! let provider = HttpProvider::new(HttpConfig::from_env())?;
//! let bulbasaur = provider.fetch_entity(EntityId::new(1).unwrap()).await?;
//! ```

pub mod endpoints;
pub mod error;
pub mod http;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use endpoints::{DEFAULT_BASE_URL, Endpoints};
pub use error::{ErrorKind, ProviderError, Result};
pub use http::{HttpConfig, HttpProvider};
pub use traits::DataProvider;

#[cfg(any(test, feature = "mock"))]
pub use mock::{CreatureFixture, MockProvider, StatFixture};
