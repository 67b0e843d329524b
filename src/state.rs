//! Per-session application state.
//!
//! DESIGN
//! ======
//! A `Session` is one user's editing context: the editor core (element store,
//! selection, prompt draft, in-flight flag) and the requestor it generates
//! through. Sessions share nothing mutable; the region catalog and backend are
//! `Arc`-shared read-only handles.

use std::sync::Arc;
use std::time::Duration;

use studio::engine::EditorCore;
use studio::regions::RegionCatalog;
use tracing::info;
use uuid::Uuid;

use crate::generation::config::GenerationConfig;
use crate::generation::{ArtworkGenerator, GenerationClient, GenerationError, GenerationRequestor};

// =============================================================================
// SESSION
// =============================================================================

pub struct Session {
    pub id: Uuid,
    pub core: EditorCore,
    pub requestor: GenerationRequestor,
}

impl Session {
    #[must_use]
    pub fn new(catalog: Arc<RegionCatalog>, backend: Arc<dyn ArtworkGenerator>, timeout: Duration) -> Self {
        let requestor = GenerationRequestor::new(Arc::clone(&catalog), backend, timeout);
        Self { id: Uuid::new_v4(), core: EditorCore::new(catalog), requestor }
    }

    /// Session over the garment catalog with the backend named by the
    /// `GENERATION_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation config is invalid or the backend
    /// cannot be built.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_config(&GenerationConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot be built from `config`.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = GenerationClient::from_config(config)?;
        let session = Self::new(
            Arc::new(RegionCatalog::garment()),
            Arc::new(client),
            Duration::from_secs(config.timeouts.request_secs),
        );
        info!(
            session_id = %session.id,
            backend = session.requestor.backend_name(),
            timeout_secs = config.timeouts.request_secs,
            "session created"
        );
        Ok(session)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::generation::placeholder::PlaceholderGenerator;

    /// Session backed by a placeholder that answers immediately.
    #[must_use]
    pub fn test_session() -> Session {
        test_session_with_backend(Arc::new(PlaceholderGenerator::instant()))
    }

    /// Session backed by a caller-supplied generator and a 30s timeout.
    #[must_use]
    pub fn test_session_with_backend(backend: Arc<dyn ArtworkGenerator>) -> Session {
        Session::new(Arc::new(RegionCatalog::garment()), backend, Duration::from_secs(30))
    }
}
