//! Compositor: turns an element and its region into the parameters the
//! presentation layer draws with.
//!
//! Everything here is a pure function of its inputs. The same element and
//! region always yield the same [`RenderTransform`], so transforms can be
//! compared directly in tests.

#[cfg(test)]
#[path = "compositor_test.rs"]
mod compositor_test;

use serde::Serialize;

use crate::consts::PERCENT;
use crate::doc::{DesignElement, ElementId, ElementStore};
use crate::regions::Region;

/// Brightness and contrast applied as a color filter, both in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorFilter {
    pub brightness_pct: f64,
    pub contrast_pct: f64,
}

/// Derived display parameters for one element.
///
/// The element is centered on its region's anchor, then scaled, then rotated
/// about its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderTransform {
    /// Anchor distance from the top edge, in percent of mockup height.
    pub top_pct: f64,
    /// Anchor distance from the left edge, in percent of mockup width.
    pub left_pct: f64,
    /// Display width of the artwork before scaling, in CSS pixels.
    pub width_px: f64,
    /// Unit scale factor (`1.0` = region width).
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
    /// Unit opacity (`0.0..=1.0`).
    pub opacity: f64,
    pub filter: ColorFilter,
}

impl RenderTransform {
    /// CSS `transform` value: center on the anchor, scale, then rotate.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate(-50%, -50%) scale({}) rotate({}deg)", self.scale, self.rotation_deg)
    }

    /// CSS `filter` value.
    #[must_use]
    pub fn css_filter(&self) -> String {
        format!("brightness({}%) contrast({}%)", self.filter.brightness_pct, self.filter.contrast_pct)
    }
}

/// Compute the render transform for `element` placed in `region`.
///
/// `remove_background` does not affect the result.
#[must_use]
pub fn compute_render_transform(element: &DesignElement, region: &Region) -> RenderTransform {
    let p = &element.properties;
    RenderTransform {
        top_pct: region.top_pct,
        left_pct: region.left_pct,
        width_px: region.width_px,
        scale: p.scale / PERCENT,
        rotation_deg: p.rotation,
        opacity: p.opacity / PERCENT,
        filter: ColorFilter { brightness_pct: p.brightness, contrast_pct: p.contrast },
    }
}

/// One element ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement<'a> {
    pub element_id: ElementId,
    /// Image source.
    pub artwork_ref: &'a str,
    /// Alt text.
    pub prompt: &'a str,
    /// Whether the element carries the selection highlight.
    pub active: bool,
    pub transform: RenderTransform,
}

/// Compose every element in the store, bottom to top.
///
/// Elements whose region is missing from the store's catalog are skipped;
/// the store never admits such elements.
#[must_use]
pub fn compose(store: &ElementStore) -> Vec<Placement<'_>> {
    let active = store.active_id();
    store
        .list()
        .iter()
        .filter_map(|element| {
            let Ok(region) = store.catalog().get(&element.region_id) else {
                return None;
            };
            Some(Placement {
                element_id: element.id,
                artwork_ref: &element.artwork_ref,
                prompt: &element.prompt,
                active: active == Some(element.id),
                transform: compute_render_transform(element, region),
            })
        })
        .collect()
}
