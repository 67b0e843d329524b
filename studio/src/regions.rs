//! Region catalog: the fixed placement zones on the garment mockup.
//!
//! Regions are defined once, before any element store exists, and never
//! change afterwards. Positions are in the mockup's coordinate space: the
//! anchor is a percentage of the mockup's height (`top_pct`) and width
//! (`left_pct`), the extent is in CSS pixels.

#[cfg(test)]
#[path = "regions_test.rs"]
mod regions_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Identifier of a region, unique within its catalog.
pub type RegionId = String;

/// A named placement zone on the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier (e.g. `"chest"`).
    pub id: RegionId,
    /// Human-readable label shown in region pickers.
    pub name: String,
    /// Anchor distance from the top edge, in percent of mockup height.
    pub top_pct: f64,
    /// Anchor distance from the left edge, in percent of mockup width.
    pub left_pct: f64,
    /// Region width in CSS pixels.
    pub width_px: f64,
    /// Region height in CSS pixels.
    pub height_px: f64,
}

impl Region {
    #[must_use]
    pub fn new(id: &str, name: &str, top_pct: f64, left_pct: f64, width_px: f64, height_px: f64) -> Self {
        Self { id: id.to_string(), name: name.to_string(), top_pct, left_pct, width_px, height_px }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("region not found: {0}")]
    NotFound(String),
    #[error("duplicate region id: {0}")]
    Duplicate(String),
    #[error("region id must not be empty")]
    EmptyId,
}

impl ErrorCode for RegionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_REGION_NOT_FOUND",
            Self::Duplicate(_) => "E_REGION_DUPLICATE",
            Self::EmptyId => "E_REGION_EMPTY_ID",
        }
    }
}

/// Ordered, immutable list of regions.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Build a catalog from an ordered list. The order is kept for listing.
    ///
    /// # Errors
    ///
    /// Returns `EmptyId` for a blank id and `Duplicate` when two regions
    /// share an id.
    pub fn new(regions: Vec<Region>) -> Result<Self, RegionError> {
        let mut seen = HashSet::new();
        for region in &regions {
            if region.id.trim().is_empty() {
                return Err(RegionError::EmptyId);
            }
            if !seen.insert(region.id.as_str()) {
                return Err(RegionError::Duplicate(region.id.clone()));
            }
        }
        Ok(Self { regions })
    }

    /// The five standard t-shirt regions.
    #[must_use]
    pub fn garment() -> Self {
        Self {
            regions: vec![
                Region::new("chest", "Chest", 30.0, 50.0, 150.0, 150.0),
                Region::new("back", "Back", 30.0, 50.0, 150.0, 150.0),
                Region::new("leftSleeve", "Left Sleeve", 35.0, 20.0, 80.0, 100.0),
                Region::new("rightSleeve", "Right Sleeve", 35.0, 80.0, 80.0, 100.0),
                Region::new("pocket", "Pocket", 25.0, 35.0, 60.0, 70.0),
            ],
        }
    }

    /// All regions in their fixed listing order.
    #[must_use]
    pub fn list(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no region has this id.
    pub fn get(&self, id: &str) -> Result<&Region, RegionError> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RegionError::NotFound(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.regions.iter().any(|r| r.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::garment()
    }
}
