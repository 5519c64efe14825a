//! Url layout of the provider's REST resources.
use catalog_core::EntityId;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Builds resource urls below a base such as `https://pokeapi.co/api/v2`.
///
/// Documents link to each other with absolute urls, so only the two
/// id-keyed entry points are built here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn entity(&self, id: EntityId) -> String {
        format!("{}/pokemon/{}/", self.base, id.get())
    }

    pub fn species(&self, id: EntityId) -> String {
        format!("{}/pokemon-species/{}/", self.base, id.get())
    }

    pub fn stat(&self, id: u32) -> String {
        format!("{}/stat/{}/", self.base, id)
    }

    pub fn evolution_chain(&self, id: u32) -> String {
        format!("{}/evolution-chain/{}/", self.base, id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
