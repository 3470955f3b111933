//! AI backend adapters
//!
//! The engine never talks to the network directly. It goes through two
//! stateless clients, [`EnrichmentClient`] and [`DiscoveryClient`], which
//! build a structured generation request, hand it to a [`ContentBackend`],
//! and validate whatever comes back into well-typed models.

pub mod discovery;
pub mod enrichment;
pub mod gemini;
pub mod schema;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{ExplorerError, Result};

pub use discovery::{DiscoveryClient, DiscoveryQuery};
pub use enrichment::EnrichmentClient;
pub use gemini::GeminiBackend;

/// A prompt plus the JSON schema the response must follow
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
}

/// Something that turns a [`GenerationRequest`] into a JSON document
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Issue a single generation request.
    ///
    /// Returns the parsed JSON body the model produced. Transport failures and
    /// non-JSON output are reported as [`ExplorerError::Backend`].
    async fn generate(&self, request: &GenerationRequest) -> Result<Value>;
}

/// Run an adapter call with an upper bound; elapsing counts as a backend failure
pub(crate) async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ExplorerError::backend(format!(
            "no response within {}s",
            limit.as_secs_f64()
        ))),
    }
}
