//! Document model: design elements, their properties, and the element store.
//!
//! This module defines what is placed on the garment (`DesignElement`), the
//! six adjustable display properties (`Properties`), a tagged edit type with
//! one case per property (`PropertyEdit`), and the store that owns every live
//! element plus the single active selection (`ElementStore`).
//!
//! Elements enter the store only after a successful generation and leave it
//! only through deletion. The store keeps them in creation order, which is
//! also draw order: later elements render on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{
    FILTER_DEFAULT, FILTER_MAX, FILTER_MIN, OPACITY_DEFAULT, OPACITY_MAX, OPACITY_MIN, ROTATION_DEFAULT,
    ROTATION_MAX, ROTATION_MIN, SCALE_DEFAULT, SCALE_MAX, SCALE_MIN,
};
use crate::error::ErrorCode;
use crate::regions::{RegionCatalog, RegionId};

// =============================================================================
// IDS
// =============================================================================

/// Unique identifier for a design element. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// The adjustable display properties of an element.
///
/// Every numeric field stays inside its inclusive range; the store rejects
/// edits that would break this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    /// Percent, `0..=100`.
    pub opacity: f64,
    /// Percent of the region width, `50..=150`.
    pub scale: f64,
    /// Degrees, `-180..=180`.
    pub rotation: f64,
    /// Percent, `0..=200`.
    pub brightness: f64,
    /// Percent, `0..=200`.
    pub contrast: f64,
    /// Hint for the generation step or presentation layer; not a transform.
    pub remove_background: bool,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            opacity: OPACITY_DEFAULT,
            scale: SCALE_DEFAULT,
            rotation: ROTATION_DEFAULT,
            brightness: FILTER_DEFAULT,
            contrast: FILTER_DEFAULT,
            remove_background: false,
        }
    }
}

impl Properties {
    /// Current value of one property, expressed as the edit that would set it.
    #[must_use]
    pub fn get(&self, kind: PropertyKind) -> PropertyEdit {
        match kind {
            PropertyKind::Opacity => PropertyEdit::Opacity(self.opacity),
            PropertyKind::Scale => PropertyEdit::Scale(self.scale),
            PropertyKind::Rotation => PropertyEdit::Rotation(self.rotation),
            PropertyKind::Brightness => PropertyEdit::Brightness(self.brightness),
            PropertyKind::Contrast => PropertyEdit::Contrast(self.contrast),
            PropertyKind::RemoveBackground => PropertyEdit::RemoveBackground(self.remove_background),
        }
    }

    fn apply(&mut self, edit: PropertyEdit) {
        match edit {
            PropertyEdit::Opacity(v) => self.opacity = v,
            PropertyEdit::Scale(v) => self.scale = v,
            PropertyEdit::Rotation(v) => self.rotation = v,
            PropertyEdit::Brightness(v) => self.brightness = v,
            PropertyEdit::Contrast(v) => self.contrast = v,
            PropertyEdit::RemoveBackground(v) => self.remove_background = v,
        }
    }
}

/// The six recognized properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Opacity,
    Scale,
    Rotation,
    Brightness,
    Contrast,
    RemoveBackground,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 6] = [
        PropertyKind::Opacity,
        PropertyKind::Scale,
        PropertyKind::Rotation,
        PropertyKind::Brightness,
        PropertyKind::Contrast,
        PropertyKind::RemoveBackground,
    ];

    /// Name used by the presentation layer.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::RemoveBackground => "removeBackground",
        }
    }

    /// Parse a presentation-layer name. Exact match only.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Inclusive `(min, max)` for numeric properties, `None` for the flag.
    #[must_use]
    pub fn range(self) -> Option<(f64, f64)> {
        match self {
            Self::Opacity => Some((OPACITY_MIN, OPACITY_MAX)),
            Self::Scale => Some((SCALE_MIN, SCALE_MAX)),
            Self::Rotation => Some((ROTATION_MIN, ROTATION_MAX)),
            Self::Brightness | Self::Contrast => Some((FILTER_MIN, FILTER_MAX)),
            Self::RemoveBackground => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single property assignment, typed per property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyEdit {
    Opacity(f64),
    Scale(f64),
    Rotation(f64),
    Brightness(f64),
    Contrast(f64),
    RemoveBackground(bool),
}

impl PropertyEdit {
    #[must_use]
    pub fn kind(self) -> PropertyKind {
        match self {
            Self::Opacity(_) => PropertyKind::Opacity,
            Self::Scale(_) => PropertyKind::Scale,
            Self::Rotation(_) => PropertyKind::Rotation,
            Self::Brightness(_) => PropertyKind::Brightness,
            Self::Contrast(_) => PropertyKind::Contrast,
            Self::RemoveBackground(_) => PropertyKind::RemoveBackground,
        }
    }

    /// Build an edit from a property name and an untyped value, as sent by
    /// sliders and toggles.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` for an unrecognized name and `WrongValueType`
    /// when the value is not a number (or not a boolean for
    /// `removeBackground`). Range is checked later by the store.
    pub fn from_json(name: &str, value: &serde_json::Value) -> Result<Self, StoreError> {
        let kind = PropertyKind::from_name(name).ok_or_else(|| StoreError::UnknownProperty(name.to_string()))?;
        let wrong_type = StoreError::WrongValueType { property: kind };
        let number = || value.as_f64().ok_or(wrong_type.clone());
        Ok(match kind {
            PropertyKind::Opacity => Self::Opacity(number()?),
            PropertyKind::Scale => Self::Scale(number()?),
            PropertyKind::Rotation => Self::Rotation(number()?),
            PropertyKind::Brightness => Self::Brightness(number()?),
            PropertyKind::Contrast => Self::Contrast(number()?),
            PropertyKind::RemoveBackground => Self::RemoveBackground(value.as_bool().ok_or(wrong_type.clone())?),
        })
    }

    /// Check the value against the property's inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` when the value is outside the range or not finite.
    pub fn validate(self) -> Result<(), StoreError> {
        let value = match self {
            Self::Opacity(v) | Self::Scale(v) | Self::Rotation(v) | Self::Brightness(v) | Self::Contrast(v) => v,
            Self::RemoveBackground(_) => return Ok(()),
        };
        let kind = self.kind();
        let (min, max) = kind.range().unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(StoreError::InvalidValue { property: kind, value, min, max })
        }
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// One generated graphic placed on the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignElement {
    pub id: ElementId,
    /// Region the element is bound to. Fixed at creation.
    pub region_id: RegionId,
    /// Text the artwork was generated from.
    pub prompt: String,
    /// Opaque reference (URL or handle) to the generated image.
    pub artwork_ref: String,
    pub properties: Properties,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("element not found: {0}")]
    NotFound(ElementId),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("wrong value type for {property}")]
    WrongValueType { property: PropertyKind },
    #[error("{property} value {value} outside {min}..={max}")]
    InvalidValue { property: PropertyKind, value: f64, min: f64, max: f64 },
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_ELEMENT_NOT_FOUND",
            Self::UnknownRegion(_) => "E_REGION_NOT_FOUND",
            Self::UnknownProperty(_) => "E_UNKNOWN_PROPERTY",
            Self::WrongValueType { .. } => "E_WRONG_VALUE_TYPE",
            Self::InvalidValue { .. } => "E_INVALID_VALUE",
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory store of design elements and the active selection.
pub struct ElementStore {
    catalog: Arc<RegionCatalog>,
    /// Creation order; doubles as render order.
    elements: Vec<DesignElement>,
    active: Option<ElementId>,
    next_id: u64,
}

impl ElementStore {
    /// Create an empty store whose elements bind to regions of `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self { catalog, elements: Vec::new(), active: None, next_id: 1 }
    }

    /// The catalog elements are bound against.
    #[must_use]
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Add a freshly generated element with default properties and make it
    /// the active element.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRegion` if `region_id` is not in the catalog. Nothing
    /// changes in that case.
    pub fn create_element(
        &mut self,
        region_id: &str,
        prompt: &str,
        artwork_ref: &str,
    ) -> Result<&DesignElement, StoreError> {
        if !self.catalog.contains(region_id) {
            return Err(StoreError::UnknownRegion(region_id.to_string()));
        }

        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(DesignElement {
            id,
            region_id: region_id.to_string(),
            prompt: prompt.to_string(),
            artwork_ref: artwork_ref.to_string(),
            properties: Properties::default(),
        });
        self.active = Some(id);
        info!(element_id = %id, region = %region_id, "element created");

        let idx = self.elements.len() - 1;
        Ok(&self.elements[idx])
    }

    /// Select an element for editing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id; the selection is kept.
    pub fn set_active(&mut self, id: ElementId) -> Result<(), StoreError> {
        if self.index_of(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        debug!(element_id = %id, "active element changed");
        self.active = Some(id);
        Ok(())
    }

    /// Drop the active selection without deleting anything.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Apply one property edit to an element.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown element and `InvalidValue` for an
    /// out-of-range value. On error the element is untouched.
    pub fn update_property(&mut self, id: ElementId, edit: PropertyEdit) -> Result<&DesignElement, StoreError> {
        let idx = self.index_of(id).ok_or(StoreError::NotFound(id))?;
        edit.validate()?;

        let element = &mut self.elements[idx];
        element.properties.apply(edit);
        debug!(element_id = %id, property = %edit.kind(), "property updated");
        Ok(element)
    }

    /// Remove an element. Clears the selection only if it pointed at `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has this id.
    pub fn delete_element(&mut self, id: ElementId) -> Result<DesignElement, StoreError> {
        let idx = self.index_of(id).ok_or(StoreError::NotFound(id))?;
        let removed = self.elements.remove(idx);
        if self.active == Some(id) {
            self.active = None;
        }
        info!(element_id = %id, remaining = self.elements.len(), "element deleted");
        Ok(removed)
    }

    /// All elements in creation (and draw) order.
    #[must_use]
    pub fn list(&self) -> &[DesignElement] {
        &self.elements
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn active_id(&self) -> Option<ElementId> {
        self.active
    }

    /// The element currently targeted by edits, if any.
    #[must_use]
    pub fn active(&self) -> Option<&DesignElement> {
        self.active.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new(Arc::new(RegionCatalog::garment()))
    }
}
