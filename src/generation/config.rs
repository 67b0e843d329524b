//! Generation configuration parsed from environment variables.

use super::types::GenerationError;

pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GENERATION_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PLACEHOLDER_DELAY_MS: u64 = 2000;
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://placehold.co/200x200";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationProviderKind {
    Placeholder,
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for GenerationTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_GENERATION_TIMEOUT_SECS, connect_secs: DEFAULT_GENERATION_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub provider: GenerationProviderKind,
    /// Endpoint for the HTTP provider.
    pub api_url: Option<String>,
    /// Bearer token for the HTTP provider.
    pub api_key: Option<String>,
    pub timeouts: GenerationTimeouts,
    pub placeholder_delay_ms: u64,
    pub placeholder_url: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProviderKind::Placeholder,
            api_url: None,
            api_key: None,
            timeouts: GenerationTimeouts::default(),
            placeholder_delay_ms: DEFAULT_PLACEHOLDER_DELAY_MS,
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

impl GenerationConfig {
    /// Build typed generation config from environment variables.
    ///
    /// Optional:
    /// - `GENERATION_PROVIDER`: `placeholder` (default) or `http`
    /// - `GENERATION_API_URL`: required when the provider is `http`
    /// - `GENERATION_API_KEY_ENV`: names the env var containing a bearer token
    /// - `GENERATION_TIMEOUT_SECS`: default 30 (also used for `0`)
    /// - `GENERATION_CONNECT_TIMEOUT_SECS`: default 10 (also used for `0`)
    /// - `GENERATION_PLACEHOLDER_DELAY_MS`: default 2000
    /// - `GENERATION_PLACEHOLDER_URL`: default `https://placehold.co/200x200`
    ///
    /// # Errors
    ///
    /// Returns `Config` for an unknown provider or a missing HTTP endpoint and
    /// `MissingApiKey` when the named key variable is unset.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here.
    ///
    /// # Errors
    ///
    /// Same as [`GenerationConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GenerationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = parse_provider(lookup("GENERATION_PROVIDER").as_deref())?;

        let api_url = lookup("GENERATION_API_URL").map(|url| url.trim_end_matches('/').to_string());
        if provider == GenerationProviderKind::Http && api_url.as_deref().is_none_or(str::is_empty) {
            return Err(GenerationError::Config("GENERATION_API_URL is required for the http provider".into()));
        }

        let api_key = match lookup("GENERATION_API_KEY_ENV") {
            Some(key_var) => Some(lookup(&key_var).ok_or(GenerationError::MissingApiKey { var: key_var })?),
            None => None,
        };

        let timeouts = GenerationTimeouts {
            request_secs: parse_nonzero_or(&lookup, "GENERATION_TIMEOUT_SECS", DEFAULT_GENERATION_TIMEOUT_SECS),
            connect_secs: parse_nonzero_or(
                &lookup,
                "GENERATION_CONNECT_TIMEOUT_SECS",
                DEFAULT_GENERATION_CONNECT_TIMEOUT_SECS,
            ),
        };
        let placeholder_delay_ms = parse_or(&lookup, "GENERATION_PLACEHOLDER_DELAY_MS", DEFAULT_PLACEHOLDER_DELAY_MS);
        let placeholder_url =
            lookup("GENERATION_PLACEHOLDER_URL").unwrap_or_else(|| DEFAULT_PLACEHOLDER_URL.to_string());

        Ok(Self { provider, api_url, api_key, timeouts, placeholder_delay_ms, placeholder_url })
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

/// Like `parse_or`, but `0` also yields the default.
fn parse_nonzero_or<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or(lookup, key, default) {
        0 => default,
        n => n,
    }
}

fn parse_provider(raw: Option<&str>) -> Result<GenerationProviderKind, GenerationError> {
    match raw.unwrap_or("placeholder") {
        "placeholder" => Ok(GenerationProviderKind::Placeholder),
        "http" => Ok(GenerationProviderKind::Http),
        other => Err(GenerationError::Config(format!("unknown GENERATION_PROVIDER: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
