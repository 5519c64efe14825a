//! reqwest-backed provider.

use async_trait::async_trait;
use catalog_core::{EntityDoc, EntityId, EvolutionChainDoc, SpeciesDoc, StatDoc};
use serde::de::DeserializeOwned;

use super::config::HttpConfig;
use crate::endpoints::Endpoints;
use crate::error::{ProviderError, Result};
use crate::traits::DataProvider;

/// Provider speaking the PokeAPI REST layout over HTTP.
///
/// Only GET requests are issued. The underlying `reqwest::Client` pools
/// connections, so one instance should be shared across an aggregation run.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    endpoints: Endpoints,
    http_client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(ProviderError::Client)?;

        Ok(Self {
            endpoints: Endpoints::new(config.base_url),
            http_client,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET `url` and decode its body as `T`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The request fails or times out ([`ProviderError::Transport`])
    /// - The provider answers with a non-success status ([`ProviderError::Status`])
    /// - The body is not a `T` ([`ProviderError::Decode`])
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| {
            tracing::debug!("Undecodable body from {}: {} bytes", url, body.len());
            ProviderError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn fetch_entity(&self, id: EntityId) -> Result<EntityDoc> {
        self.get_json(&self.endpoints.entity(id)).await
    }

    async fn fetch_species(&self, url: &str) -> Result<SpeciesDoc> {
        self.get_json(url).await
    }

    async fn fetch_species_by_id(&self, id: EntityId) -> Result<SpeciesDoc> {
        self.get_json(&self.endpoints.species(id)).await
    }

    async fn fetch_stat(&self, url: &str) -> Result<StatDoc> {
        self.get_json(url).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainDoc> {
        self.get_json(url).await
    }

    fn name(&self) -> &str {
        "http"
    }
}
