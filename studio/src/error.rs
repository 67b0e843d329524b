//! Stable error codes.
//!
//! Every error type in the studio (and in hosts built on it) maps to a
//! grep-able `E_*` code so the presentation layer can branch on failures
//! without matching on display strings.

/// Machine-readable classification for an error value.
pub trait ErrorCode {
    /// Stable, upper-case code such as `E_ELEMENT_NOT_FOUND`.
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same request may succeed.
    fn retryable(&self) -> bool {
        false
    }
}
