//! PokeAPI-compatible REST provider.
//!
//! ## Modules
//!
//! - [`client`]: reqwest-backed [`HttpProvider`]
//! - [`config`]: base url and timeout settings

pub mod client;
pub mod config;

pub use client::HttpProvider;
pub use config::HttpConfig;
