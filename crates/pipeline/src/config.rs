//! Aggregation run configuration.
use std::env;

use catalog_core::DEFAULT_LOCALE;

/// What a failed id does to the rest of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ErrorPolicy {
    /// The first failure aborts the run; no views are returned.
    #[default]
    AllOrNothing,
    /// Every id is attempted; failures are reported next to the views.
    Partial,
}

/// Where the evolution chain link is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpeciesLookup {
    /// Follow `evolution_chain.url` on the species document already fetched
    /// for localization.
    #[default]
    Reuse,
    /// Fetch the species document a second time by creature id and follow its
    /// `evolution_chain.url`.
    Refetch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Provider language tag used for names, flavor text and stat labels.
    pub locale: String,
    /// Upper bound on creatures resolved at the same time.
    pub concurrency: usize,
    pub error_policy: ErrorPolicy,
    pub species_lookup: SpeciesLookup,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            concurrency: Self::DEFAULT_CONCURRENCY,
            error_policy: ErrorPolicy::default(),
            species_lookup: SpeciesLookup::default(),
        }
    }
}

impl PipelineConfig {
    pub const DEFAULT_CONCURRENCY: usize = 16;

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_species_lookup(mut self, lookup: SpeciesLookup) -> Self {
        self.species_lookup = lookup;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `POKEDEX_LOCALE` - Language tag (default: fr)
    /// - `POKEDEX_CONCURRENCY` - Creatures resolved at once (default: 16, minimum 1)
    /// - `POKEDEX_ERROR_POLICY` - `all-or-nothing` or `partial` (default: all-or-nothing)
    /// - `POKEDEX_SPECIES_LOOKUP` - `reuse` or `refetch` (default: reuse)
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(locale) = env::var("POKEDEX_LOCALE")
            .ok()
            .map(|locale| locale.trim().to_string())
            .filter(|locale| !locale.is_empty())
        {
            config.locale = locale;
        }

        if let Some(concurrency) = read_env::<usize>("POKEDEX_CONCURRENCY") {
            config.concurrency = concurrency.max(1);
        }

        if let Some(policy) = read_env::<ErrorPolicy>("POKEDEX_ERROR_POLICY") {
            config.error_policy = policy;
        }

        if let Some(lookup) = read_env::<SpeciesLookup>("POKEDEX_SPECIES_LOOKUP") {
            config.species_lookup = lookup;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
