use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::compositor::{Placement, compose};
use crate::doc::{DesignElement, ElementId, ElementStore, PropertyEdit, StoreError};
use crate::error::ErrorCode;
use crate::regions::{Region, RegionCatalog, RegionError, RegionId};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
    #[error("a generation is already in flight")]
    Busy,
    #[error("no active element")]
    NoActiveElement,
    #[error("generation ticket {0} is not the one in flight")]
    StaleTicket(Uuid),
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for EditorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "E_INVALID_REQUEST",
            Self::Busy => "E_GENERATION_BUSY",
            Self::NoActiveElement => "E_NO_ACTIVE_ELEMENT",
            Self::StaleTicket(_) => "E_STALE_TICKET",
            Self::Region(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

/// Check a generation request before anything is sent to a backend.
///
/// # Errors
///
/// Returns `InvalidRequest` when the region is not in `catalog` or the prompt
/// is blank after trimming.
pub fn validate_request(catalog: &RegionCatalog, region_id: &str, prompt: &str) -> Result<(), EditorError> {
    if !catalog.contains(region_id) {
        return Err(EditorError::InvalidRequest(format!("unknown region '{region_id}'")));
    }
    if prompt.trim().is_empty() {
        return Err(EditorError::InvalidRequest("prompt is empty".into()));
    }
    Ok(())
}

/// Session-scoped UI state that is not part of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUi {
    /// Region the next generation targets.
    pub selected_region: Option<RegionId>,
    /// Prompt draft being typed.
    pub prompt: String,
    /// Set while a generation is in flight.
    pub generating: Option<Uuid>,
}

/// Proof that a generation was started; handed back when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub request_id: Uuid,
    pub region_id: RegionId,
    pub prompt: String,
}

/// Core editor state: the element store plus the session context around it.
///
/// Owned by exactly one session. Every method applies fully or not at all.
pub struct EditorCore {
    pub doc: ElementStore,
    pub ui: SessionUi,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(Arc::new(RegionCatalog::garment()))
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self { doc: ElementStore::new(catalog), ui: SessionUi::default() }
    }

    // --- Region / prompt ---

    /// Choose the region the next generation targets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown region; the selection is kept.
    pub fn select_region(&mut self, id: &str) -> Result<&Region, EditorError> {
        let region = self.doc.catalog().get(id)?;
        self.ui.selected_region = Some(region.id.clone());
        debug!(region = %id, "region selected");
        Ok(region)
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.ui.prompt = text.to_string();
    }

    /// Whether a generation may be submitted right now.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.ui.selected_region.is_some() && !self.ui.prompt.trim().is_empty() && !self.is_generating()
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.ui.generating.is_some()
    }

    // --- Generation lifecycle ---

    /// Start a generation for the selected region and current prompt.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while another generation is in flight and
    /// `InvalidRequest` when no region is selected or the prompt is blank.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, EditorError> {
        if self.is_generating() {
            return Err(EditorError::Busy);
        }
        let Some(region_id) = self.ui.selected_region.clone() else {
            return Err(EditorError::InvalidRequest("no region selected".into()));
        };
        validate_request(self.doc.catalog(), &region_id, &self.ui.prompt)?;

        let ticket = GenerationTicket { request_id: Uuid::new_v4(), region_id, prompt: self.ui.prompt.clone() };
        self.ui.generating = Some(ticket.request_id);
        info!(request_id = %ticket.request_id, region = %ticket.region_id, "generation started");
        Ok(ticket)
    }

    /// Turn a finished generation into a new, active element.
    ///
    /// Clears the prompt draft and the in-flight flag. The region selection
    /// is kept so the user can generate again for the same area.
    ///
    /// # Errors
    ///
    /// Returns `StaleTicket` if `ticket` is not the generation in flight.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        artwork_ref: &str,
    ) -> Result<&DesignElement, EditorError> {
        self.check_ticket(&ticket)?;
        let element = self
            .doc
            .create_element(&ticket.region_id, &ticket.prompt, artwork_ref)?;
        self.ui.generating = None;
        self.ui.prompt.clear();
        info!(request_id = %ticket.request_id, element_id = %element.id, "generation finished");
        Ok(element)
    }

    /// Record a failed generation. Prompt and selection are left for a retry.
    ///
    /// # Errors
    ///
    /// Returns `StaleTicket` if `ticket` is not the generation in flight.
    pub fn abort_generation(&mut self, ticket: GenerationTicket) -> Result<(), EditorError> {
        self.check_ticket(&ticket)?;
        self.ui.generating = None;
        warn!(request_id = %ticket.request_id, "generation aborted");
        Ok(())
    }

    fn check_ticket(&self, ticket: &GenerationTicket) -> Result<(), EditorError> {
        if self.ui.generating == Some(ticket.request_id) {
            Ok(())
        } else {
            Err(EditorError::StaleTicket(ticket.request_id))
        }
    }

    // --- Active element ---

    /// Select an element for editing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the element does not exist.
    pub fn set_active(&mut self, id: ElementId) -> Result<(), EditorError> {
        Ok(self.doc.set_active(id)?)
    }

    /// Apply an edit to the active element.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveElement` when nothing is selected and `InvalidValue`
    /// when the value is out of range.
    pub fn update_active(&mut self, edit: PropertyEdit) -> Result<&DesignElement, EditorError> {
        let id = self.doc.active_id().ok_or(EditorError::NoActiveElement)?;
        self.doc.update_property(id, edit).map_err(|e| {
            warn!(element_id = %id, error = %e, "property edit rejected");
            EditorError::from(e)
        })
    }

    /// Apply a string-keyed edit (slider name plus raw value) to the active
    /// element.
    ///
    /// # Errors
    ///
    /// As [`EditorCore::update_active`], plus `UnknownProperty` and
    /// `WrongValueType` from parsing.
    pub fn update_active_named(
        &mut self,
        property: &str,
        value: &serde_json::Value,
    ) -> Result<&DesignElement, EditorError> {
        let edit = PropertyEdit::from_json(property, value)?;
        self.update_active(edit)
    }

    /// Delete the active element and clear the selection.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveElement` when nothing is selected.
    pub fn delete_active(&mut self) -> Result<DesignElement, EditorError> {
        let id = self.doc.active_id().ok_or(EditorError::NoActiveElement)?;
        Ok(self.doc.delete_element(id)?)
    }

    // --- Queries ---

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        self.doc.catalog().list()
    }

    #[must_use]
    pub fn elements(&self) -> &[DesignElement] {
        self.doc.list()
    }

    #[must_use]
    pub fn active_element(&self) -> Option<&DesignElement> {
        self.doc.active()
    }

    /// Region the next generation targets, if one is selected.
    #[must_use]
    pub fn selected_region(&self) -> Option<&Region> {
        let id = self.ui.selected_region.as_deref()?;
        self.doc.catalog().list().iter().find(|r| r.id == id)
    }

    /// The composed scene, bottom to top.
    #[must_use]
    pub fn scene(&self) -> Vec<Placement<'_>> {
        compose(&self.doc)
    }
}
