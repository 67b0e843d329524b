//! Generation: artwork backends behind one async contract.
//!
//! DESIGN
//! ======
//! `GenerationClient` dispatches to the placeholder or HTTP backend based on
//! `GENERATION_PROVIDER`. `GenerationRequestor` sits in front of any
//! [`ArtworkGenerator`]: it checks preconditions against the region catalog,
//! enforces the overall timeout, and logs the outcome.

pub mod config;
pub mod http;
pub mod placeholder;
pub mod requestor;
pub mod types;

use std::time::Duration;

use config::{GenerationConfig, GenerationProviderKind};
pub use requestor::GenerationRequestor;
pub use types::{Artwork, ArtworkGenerator, FailureKind, GenerationError, GenerationRequest};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete generator that dispatches to the configured backend.
///
/// Built from a [`GenerationConfig`], usually read from the environment.
pub struct GenerationClient {
    inner: GenerationProvider,
}

enum GenerationProvider {
    Placeholder(placeholder::PlaceholderGenerator),
    Http(http::HttpGenerator),
}

impl GenerationClient {
    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the HTTP provider has no endpoint, or
    /// `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let inner = match config.provider {
            GenerationProviderKind::Placeholder => GenerationProvider::Placeholder(placeholder::PlaceholderGenerator::new(
                Duration::from_millis(config.placeholder_delay_ms),
                config.placeholder_url.clone(),
            )),
            GenerationProviderKind::Http => {
                let url = config
                    .api_url
                    .clone()
                    .ok_or_else(|| GenerationError::Config("GENERATION_API_URL is required for the http provider".into()))?;
                GenerationProvider::Http(http::HttpGenerator::new(url, config.api_key.clone(), config.timeouts)?)
            }
        };
        Ok(Self { inner })
    }
}

#[async_trait::async_trait]
impl ArtworkGenerator for GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Artwork, GenerationError> {
        match &self.inner {
            GenerationProvider::Placeholder(g) => g.generate(request).await,
            GenerationProvider::Http(g) => g.generate(request).await,
        }
    }

    fn name(&self) -> &'static str {
        match &self.inner {
            GenerationProvider::Placeholder(g) => g.name(),
            GenerationProvider::Http(g) => g.name(),
        }
    }
}

/// Saturating milliseconds of a duration, for error values and log fields.
pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
