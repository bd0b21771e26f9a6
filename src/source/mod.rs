//! Collection log sources
//!
//! This module provides:
//! - The `CollectionLogSource` trait the runner fetches through
//! - The HTTP implementation backed by reqwest (`client`)
//!
//! The runner never talks to the network directly, which lets
//! tests substitute an in-memory source.

pub mod client;

use thiserror::Error;

/// Result of a completed request.
///
/// A non-success status is not an error: the member simply has
/// no usable log (unknown user, private profile, service hiccup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response, raw body
    Document(String),

    /// Any other status code
    Rejected(u16),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Looks up the collection log of one member.
///
/// CONTRACT:
/// - Exactly one request per call, no retries
/// - Must not parse the body (extraction owns that)
///
#[async_trait::async_trait]
pub trait CollectionLogSource: Send + Sync {
    /// Short name for log lines (e.g. "collectionlog.net")
    fn name(&self) -> &str;

    async fn fetch(&self, member: &str) -> Result<FetchOutcome, FetchError>;
}
