//! Requestor: validated, time-bounded access to an artwork backend.
//!
//! DESIGN
//! ======
//! Preconditions (known region, non-blank prompt) are checked before the
//! backend is touched. The backend call is wrapped in `tokio::time::timeout`;
//! when it elapses the backend future is dropped and the caller sees
//! `GenerationError::Timeout`. At most one request per session is expected to
//! be in flight; the editor core enforces that, not this type.

use std::sync::Arc;
use std::time::Duration;

use studio::engine::{EditorError, GenerationTicket, validate_request};
use studio::regions::RegionCatalog;
use tracing::{info, warn};
use uuid::Uuid;

use super::duration_ms;
use super::types::{Artwork, ArtworkGenerator, GenerationError, GenerationRequest};

pub struct GenerationRequestor {
    catalog: Arc<RegionCatalog>,
    backend: Arc<dyn ArtworkGenerator>,
    timeout: Duration,
}

impl GenerationRequestor {
    #[must_use]
    pub fn new(catalog: Arc<RegionCatalog>, backend: Arc<dyn ArtworkGenerator>, timeout: Duration) -> Self {
        Self { catalog, backend, timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Request artwork for `prompt` in `region_id`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` without contacting the backend when the region
    /// is unknown or the prompt is blank, `Timeout` when the backend does not
    /// answer in time, and the backend's own error otherwise.
    pub async fn generate(&self, region_id: &str, prompt: &str) -> Result<Artwork, GenerationError> {
        self.run(GenerationRequest {
            request_id: Uuid::new_v4(),
            region_id: region_id.to_string(),
            prompt: prompt.to_string(),
        })
        .await
    }

    /// Request artwork for a generation started by the editor core. The
    /// ticket's request id is reused so log lines correlate.
    ///
    /// # Errors
    ///
    /// Same as [`GenerationRequestor::generate`].
    pub async fn generate_for(&self, ticket: &GenerationTicket) -> Result<Artwork, GenerationError> {
        self.run(GenerationRequest {
            request_id: ticket.request_id,
            region_id: ticket.region_id.clone(),
            prompt: ticket.prompt.clone(),
        })
        .await
    }

    async fn run(&self, request: GenerationRequest) -> Result<Artwork, GenerationError> {
        validate_request(&self.catalog, &request.region_id, &request.prompt).map_err(|e| match e {
            EditorError::InvalidRequest(msg) => GenerationError::InvalidRequest(msg),
            other => GenerationError::InvalidRequest(other.to_string()),
        })?;

        info!(
            request_id = %request.request_id,
            region = %request.region_id,
            prompt_len = request.prompt.len(),
            backend = self.backend.name(),
            "generation: request sent"
        );

        let outcome = match tokio::time::timeout(self.timeout, self.backend.generate(&request)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(GenerationError::Timeout { after_ms: duration_ms(self.timeout) }),
        };

        match &outcome {
            Ok(artwork) => {
                info!(request_id = %request.request_id, artwork = %artwork.artwork_ref, "generation: artwork received");
            }
            Err(e) => {
                warn!(request_id = %request.request_id, error = %e, kind = ?e.failure_kind(), "generation: failed");
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "requestor_test.rs"]
mod tests;
