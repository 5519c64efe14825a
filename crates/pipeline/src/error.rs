//! Error types surfaced by the aggregation pipeline.
use catalog_core::{ChainError, EntityId};
use catalog_provider::ProviderError;
use thiserror::Error;

/// Why one creature could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("provider returned creature #{returned} when {requested} was requested")]
    IdMismatch {
        requested: EntityId,
        returned: u32,
    },
}

/// Failure of a whole aggregation run.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("failed to resolve creature {id}")]
    Entity {
        id: EntityId,
        #[source]
        source: ResolveError,
    },

    #[error("aggregation cancelled")]
    Cancelled,
}

impl AggregateError {
    /// The creature whose resolution aborted the run.
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            AggregateError::Entity { id, .. } => Some(*id),
            AggregateError::Cancelled => None,
        }
    }
}

/// A creature that failed under [`crate::ErrorPolicy::Partial`].
#[derive(Debug)]
pub struct EntityFailure {
    pub id: EntityId,
    pub error: ResolveError,
}
