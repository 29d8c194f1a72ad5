//! Core components of the `beluga` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`BelugaClient`] and its builder.
//! - The primary [`BelugaError`] type.
//! - The [`Upstream`] descriptors that decide hosts and key placement.
//! - Internal networking (retry, cache, fixture recording).

/// The main client (`BelugaClient`), builder, and configuration.
pub mod client;
/// The primary error type (`BelugaError`) for the crate.
pub mod error;
/// Raw and JSON fetch helpers shared by the API modules and the proxy.
pub mod fetch;
/// The third-party services and how each one is authorized.
pub mod upstream;
pub(crate) mod wire;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::BelugaClient`
pub use client::{BelugaClient, BelugaClientBuilder, CacheMode, RetryConfig, SanityConfig};
pub use error::BelugaError;
pub use fetch::RawResponse;
pub use upstream::{KEY_QUERY_PARAMS, KeyPlacement, Upstream};
