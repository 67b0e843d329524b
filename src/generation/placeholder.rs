//! Placeholder backend: waits a fixed interval, then returns a constant image.
//!
//! This is the default backend and the stand-in used in tests. It never fails
//! and is not cancellable once started (dropping the future is the only way
//! out, which is what the requestor's timeout does).

use std::time::Duration;

use tracing::debug;

use super::config::{DEFAULT_PLACEHOLDER_DELAY_MS, DEFAULT_PLACEHOLDER_URL};
use super::duration_ms;
use super::types::{Artwork, ArtworkGenerator, GenerationError, GenerationRequest};

pub struct PlaceholderGenerator {
    delay: Duration,
    artwork_ref: String,
}

impl PlaceholderGenerator {
    #[must_use]
    pub fn new(delay: Duration, artwork_ref: impl Into<String>) -> Self {
        Self { delay, artwork_ref: artwork_ref.into() }
    }

    /// A placeholder that answers without waiting.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, DEFAULT_PLACEHOLDER_URL)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for PlaceholderGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PLACEHOLDER_DELAY_MS), DEFAULT_PLACEHOLDER_URL)
    }
}

#[async_trait::async_trait]
impl ArtworkGenerator for PlaceholderGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Artwork, GenerationError> {
        debug!(request_id = %request.request_id, delay_ms = duration_ms(self.delay), "placeholder: simulating generation");
        tokio::time::sleep(self.delay).await;
        Ok(Artwork { artwork_ref: self.artwork_ref.clone() })
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}
