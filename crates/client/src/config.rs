//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use catalog_core::{CatalogQuery, EntityId, EntityRange, SortKey, SpriteVariant};
use catalog_provider::HttpConfig;
use pipeline::PipelineConfig;

/// How the catalog is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything the `pokedex` binary needs for one run.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub http: HttpConfig,
    pub pipeline: PipelineConfig,
    pub range: EntityRange,
    pub query: CatalogQuery,
    /// Creature to show a detail card for, after the list.
    pub detail: Option<EntityId>,
    pub sprite: SpriteVariant,
    pub output: OutputFormat,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Provider and pipeline settings are read by [`HttpConfig::from_env`]
    /// and [`PipelineConfig::from_env`]. On top of those:
    /// - `POKEDEX_RANGE` - Ids to fetch as `start-end` (default: 1-151)
    /// - `POKEDEX_SEARCH` - Name filter (default: empty, shows everything)
    /// - `POKEDEX_SORT` - `name`, `type` or `number` (default: unsorted)
    /// - `POKEDEX_DETAIL` - Id to show a detail card for (default: none)
    /// - `POKEDEX_SHINY` - Show the shiny sprite on the detail card (default: false)
    /// - `POKEDEX_OUTPUT` - `text` or `json` (default: text)
    /// - `POKEDEX_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        let mut config = Self {
            http: HttpConfig::from_env(),
            pipeline: PipelineConfig::from_env(),
            ..Self::default()
        };

        if let Some(range) = read_env::<EntityRange>("POKEDEX_RANGE") {
            config.range = range;
        }

        if let Ok(search) = env::var("POKEDEX_SEARCH") {
            config.query.search = search;
        }

        config.query.sort = read_env::<SortKey>("POKEDEX_SORT");
        config.detail = read_env::<EntityId>("POKEDEX_DETAIL");

        if read_env_bool("POKEDEX_SHINY").unwrap_or(false) {
            config.sprite = SpriteVariant::Shiny;
        }

        if let Some(output) = read_env::<OutputFormat>("POKEDEX_OUTPUT") {
            config.output = output;
        }

        config.log_dir = env::var_os("POKEDEX_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
