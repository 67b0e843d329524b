//! Design service: one generate-then-place cycle for a session.
//!
//! DESIGN
//! ======
//! The editor core is flagged as generating before the backend is awaited
//! and unflagged on every exit path, so a host can disable its submit
//! control from `is_generating()` while the request is out. A failed request
//! leaves the prompt draft and region selection in place for a retry and
//! creates nothing. If the caller drops the future mid-request (its own
//! timeout, a `select!`, shutdown), `InFlight` aborts the ticket on drop so
//! the session is not left busy.

use studio::doc::DesignElement;
use studio::engine::{EditorCore, EditorError, GenerationTicket};
use studio::error::ErrorCode;
use tracing::warn;
use uuid::Uuid;

use crate::generation::GenerationError;
use crate::state::Session;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DesignError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl ErrorCode for DesignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Editor(e) => e.error_code(),
            Self::Generation(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Editor(e) => e.retryable(),
            Self::Generation(e) => e.retryable(),
        }
    }
}

// =============================================================================
// GENERATE
// =============================================================================

/// Generate artwork for the session's selected region and prompt draft, then
/// place it as a new active element.
///
/// # Errors
///
/// Returns `Editor(Busy)` while another generation is in flight,
/// `Editor(InvalidRequest)` when no region is selected or the prompt is
/// blank, and `Generation(_)` when the backend fails or times out.
pub async fn generate_design(session: &mut Session) -> Result<DesignElement, DesignError> {
    let ticket = session.core.begin_generation()?;
    let request = ticket.clone();
    let mut in_flight = InFlight::new(&mut session.core, ticket);

    match session.requestor.generate_for(&request).await {
        Ok(artwork) => in_flight.finish(&artwork.artwork_ref),
        Err(err) => {
            warn!(session_id = %session.id, request_id = %request.request_id, error = %err, "design: generation failed");
            in_flight.abort()?;
            Err(err.into())
        }
    }
}

// =============================================================================
// IN-FLIGHT GUARD
// =============================================================================

/// Holds the ticket while the backend is awaited. Finish, abort, or the
/// future being dropped each hand the ticket back to the editor core, and
/// only one of them does.
struct InFlight<'a> {
    core: &'a mut EditorCore,
    request_id: Uuid,
    ticket: Option<GenerationTicket>,
}

impl<'a> InFlight<'a> {
    fn new(core: &'a mut EditorCore, ticket: GenerationTicket) -> Self {
        Self { core, request_id: ticket.request_id, ticket: Some(ticket) }
    }

    fn finish(&mut self, artwork_ref: &str) -> Result<DesignElement, DesignError> {
        let ticket = self.take()?;
        match self.core.finish_generation(ticket.clone(), artwork_ref) {
            Ok(element) => Ok(element.clone()),
            Err(e) => {
                // Keep the ticket so drop still releases the in-flight flag.
                self.ticket = Some(ticket);
                Err(e.into())
            }
        }
    }

    fn abort(&mut self) -> Result<(), DesignError> {
        let ticket = self.take()?;
        Ok(self.core.abort_generation(ticket)?)
    }

    fn take(&mut self) -> Result<GenerationTicket, EditorError> {
        self.ticket.take().ok_or(EditorError::StaleTicket(self.request_id))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        match self.core.abort_generation(ticket) {
            Ok(()) => warn!(request_id = %self.request_id, "design: generation cancelled"),
            Err(e) => warn!(request_id = %self.request_id, error = %e, "design: cancel failed"),
        }
    }
}

/// Select `region_id`, set the prompt draft, and run [`generate_design`].
///
/// # Errors
///
/// Returns `Editor(Region(NotFound))` for an unknown region (selection
/// unchanged), otherwise as [`generate_design`].
pub async fn generate_design_in(
    session: &mut Session,
    region_id: &str,
    prompt: &str,
) -> Result<DesignElement, DesignError> {
    if session.core.is_generating() {
        return Err(EditorError::Busy.into());
    }
    session.core.select_region(region_id)?;
    session.core.set_prompt(prompt);
    generate_design(session).await
}

#[cfg(test)]
#[path = "design_test.rs"]
mod tests;
