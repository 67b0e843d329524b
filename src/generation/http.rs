//! HTTP image-generation backend.
//!
//! Thin wrapper over a JSON endpoint: `POST {url}` with
//! `{ "region": ..., "prompt": ... }`, answered by `{ "artworkRef": ... }`.
//! Pure parsing in `parse_response` for testability.

use std::time::Duration;

use super::config::GenerationTimeouts;
use super::duration_ms;
use super::types::{Artwork, ArtworkGenerator, GenerationError, GenerationRequest};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGenerator {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    request_timeout: Duration,
}

impl HttpGenerator {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn new(url: String, api_key: Option<String>, timeouts: GenerationTimeouts) -> Result<Self, GenerationError> {
        let request_timeout = Duration::from_secs(timeouts.request_secs);
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| GenerationError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url, api_key, request_timeout })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout { after_ms: duration_ms(self.request_timeout) }
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ArtworkGenerator for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Artwork, GenerationError> {
        let body = ApiRequest { region: &request.region_id, prompt: &request.prompt };

        let mut builder = self
            .http
            .post(&self.url)
            .header("x-request-id", request.request_id.to_string())
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        if !status.is_success() {
            return Err(GenerationError::Service { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    region: &'a str,
    prompt: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<Artwork, GenerationError> {
    let artwork: Artwork = serde_json::from_str(json).map_err(|e| GenerationError::Parse(e.to_string()))?;
    if artwork.artwork_ref.trim().is_empty() {
        return Err(GenerationError::Parse("empty artworkRef".into()));
    }
    Ok(artwork)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
