//! Generation types: the backend contract and its errors.
//!
//! Every backend (placeholder, HTTP, test mocks) implements
//! [`ArtworkGenerator`], so callers never depend on which one is wired in.

use serde::{Deserialize, Serialize};
use studio::error::ErrorCode;
use uuid::Uuid;

// =============================================================================
// ERROR
// =============================================================================

/// How a generation that reached the backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    ServiceError,
}

/// Errors produced while requesting artwork.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Preconditions failed; no backend was contacted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The backend did not answer within the allotted time.
    #[error("generation timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// The request could not be delivered or its response not read.
    #[error("generation request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success HTTP status.
    #[error("generation service error: status {status}")]
    Service { status: u16, body: String },

    /// The backend response body could not be understood.
    #[error("generation response parse failed: {0}")]
    Parse(String),

    /// A configuration value is missing or invalid.
    #[error("generation config invalid: {0}")]
    Config(String),

    /// The env var that should hold the API key is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GenerationError {
    /// Classify a failure that happened at the backend. Setup and validation
    /// errors return `None`.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Timeout { .. } => Some(FailureKind::Timeout),
            Self::Request(_) | Self::Service { .. } | Self::Parse(_) => Some(FailureKind::ServiceError),
            Self::InvalidRequest(_) | Self::Config(_) | Self::MissingApiKey { .. } | Self::HttpClientBuild(_) => None,
        }
    }
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "E_INVALID_REQUEST",
            Self::Timeout { .. } => "E_GENERATION_TIMEOUT",
            Self::Request(_) => "E_GENERATION_REQUEST",
            Self::Service { .. } => "E_GENERATION_SERVICE",
            Self::Parse(_) => "E_GENERATION_PARSE",
            Self::Config(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Request(_) | Self::Service { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// What a backend is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Correlates log lines for one generation across layers.
    pub request_id: Uuid,
    pub region_id: String,
    pub prompt: String,
}

/// What a backend produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// Opaque image reference (URL or content handle).
    pub artwork_ref: String,
}

// =============================================================================
// GENERATOR TRAIT
// =============================================================================

/// Backend-neutral async trait for artwork generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ArtworkGenerator: Send + Sync {
    /// Produce artwork for a validated request.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the backend fails, times out, or
    /// answers with something unusable.
    async fn generate(&self, request: &GenerationRequest) -> Result<Artwork, GenerationError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
