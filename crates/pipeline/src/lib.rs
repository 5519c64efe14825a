//! Aggregation pipeline for the creature catalog.
//!
//! Turns a batch of creature ids into a [`CatalogStore`] of fully joined,
//! localized, evolution-aware [`CreatureView`]s by issuing the dependent
//! provider lookups for every id.
//!
//! # Flow
//!
//! ```text
//! ids ──► bounded fan-out (PipelineConfig::concurrency)
//!           └─► per id: entity ─► species ┬─► stat labels
//!                                         └─► evolution chain ─► flatten
//!       ──► reassembled in input order ─► AggregationReport
//! ```
//!
//! Failures follow [`ErrorPolicy`]: all-or-nothing (the default) aborts on
//! the first failed id, partial keeps going and reports failed ids next to
//! the successful views. Runs can be cancelled with a
//! [`CancellationToken`].
//!
//! [`CatalogStore`]: catalog_core::CatalogStore
//! [`CreatureView`]: catalog_core::CreatureView
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod aggregator;
pub mod config;
pub mod error;
pub mod resolve;

pub use aggregator::{AggregationReport, Aggregator, aggregate};
pub use config::{ErrorPolicy, PipelineConfig, SpeciesLookup};
pub use error::{AggregateError, EntityFailure, ResolveError};
pub use resolve::{resolve_creature, resolve_details};

pub use tokio_util::sync::CancellationToken;
