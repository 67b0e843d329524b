#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::doc::Properties;

// =============================================================
// Helpers
// =============================================================

const PLACEHOLDER: &str = "https://placehold.co/200x200";

fn core() -> EditorCore {
    EditorCore::default()
}

/// Run one successful generation for `region` with `prompt`.
fn generate(core: &mut EditorCore, region: &str, prompt: &str) -> ElementId {
    core.select_region(region).unwrap();
    core.set_prompt(prompt);
    let ticket = core.begin_generation().unwrap();
    core.finish_generation(ticket, PLACEHOLDER).unwrap().id
}

// =============================================================
// validate_request
// =============================================================

#[test]
fn validate_accepts_known_region_and_text() {
    let catalog = RegionCatalog::garment();
    assert!(validate_request(&catalog, "chest", "logo").is_ok());
}

#[test]
fn validate_rejects_unknown_region() {
    let catalog = RegionCatalog::garment();
    let err = validate_request(&catalog, "collar", "logo").unwrap_err();
    assert!(matches!(err, EditorError::InvalidRequest(msg) if msg.contains("collar")));
}

#[test]
fn validate_rejects_blank_prompt() {
    let catalog = RegionCatalog::garment();
    for prompt in ["", "   ", "\n\t"] {
        let err = validate_request(&catalog, "chest", prompt).unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_REQUEST");
    }
}

// =============================================================
// Region / prompt
// =============================================================

#[test]
fn default_core_lists_garment_regions() {
    let c = core();
    assert_eq!(c.regions().len(), 5);
    assert!(c.elements().is_empty());
    assert!(c.selected_region().is_none());
}

#[test]
fn select_region_known() {
    let mut c = core();
    let region = c.select_region("back").unwrap();
    assert_eq!(region.name, "Back");
    assert_eq!(c.selected_region().map(|r| r.id.as_str()), Some("back"));
}

#[test]
fn select_region_unknown_keeps_previous() {
    let mut c = core();
    c.select_region("chest").unwrap();
    let err = c.select_region("collar").unwrap_err();
    assert_eq!(err, EditorError::Region(RegionError::NotFound("collar".into())));
    assert_eq!(err.error_code(), "E_REGION_NOT_FOUND");
    assert_eq!(c.ui.selected_region.as_deref(), Some("chest"));
}

#[test]
fn can_generate_requires_region_prompt_and_idle() {
    let mut c = core();
    assert!(!c.can_generate());
    c.set_prompt("logo");
    assert!(!c.can_generate());
    c.select_region("chest").unwrap();
    assert!(c.can_generate());
    c.set_prompt("  ");
    assert!(!c.can_generate());
    c.set_prompt("logo");
    let _ticket = c.begin_generation().unwrap();
    assert!(!c.can_generate());
}

// =============================================================
// Generation lifecycle
// =============================================================

#[test]
fn begin_sets_generating_flag() {
    let mut c = core();
    c.select_region("chest").unwrap();
    c.set_prompt("logo");
    let ticket = c.begin_generation().unwrap();
    assert!(c.is_generating());
    assert_eq!(ticket.region_id, "chest");
    assert_eq!(ticket.prompt, "logo");
}

#[test]
fn begin_without_region_is_invalid() {
    let mut c = core();
    c.set_prompt("logo");
    let err = c.begin_generation().unwrap_err();
    assert!(matches!(err, EditorError::InvalidRequest(_)));
    assert!(!c.is_generating());
}

#[test]
fn begin_with_blank_prompt_is_invalid() {
    let mut c = core();
    c.select_region("chest").unwrap();
    c.set_prompt("   ");
    assert!(matches!(c.begin_generation(), Err(EditorError::InvalidRequest(_))));
    assert!(!c.is_generating());
}

#[test]
fn begin_while_generating_is_busy() {
    let mut c = core();
    c.select_region("chest").unwrap();
    c.set_prompt("logo");
    let _first = c.begin_generation().unwrap();
    let err = c.begin_generation().unwrap_err();
    assert_eq!(err, EditorError::Busy);
    assert!(err.retryable());
}

#[test]
fn finish_creates_active_element_and_clears_prompt() {
    let mut c = core();
    c.select_region("chest").unwrap();
    c.set_prompt("logo");
    let ticket = c.begin_generation().unwrap();
    let el = c.finish_generation(ticket, PLACEHOLDER).unwrap().clone();

    assert_eq!(el.region_id, "chest");
    assert_eq!(el.prompt, "logo");
    assert_eq!(el.artwork_ref, PLACEHOLDER);
    assert_eq!(el.properties, Properties::default());
    assert_eq!(c.active_element(), Some(&el));
    assert!(!c.is_generating());
    assert!(c.ui.prompt.is_empty());
    assert_eq!(c.ui.selected_region.as_deref(), Some("chest"));
}

#[test]
fn abort_keeps_prompt_and_selection() {
    let mut c = core();
    c.select_region("pocket").unwrap();
    c.set_prompt("tiny fox");
    let ticket = c.begin_generation().unwrap();
    c.abort_generation(ticket).unwrap();

    assert!(!c.is_generating());
    assert_eq!(c.ui.prompt, "tiny fox");
    assert_eq!(c.ui.selected_region.as_deref(), Some("pocket"));
    assert!(c.elements().is_empty());
    assert!(c.can_generate());
}

#[test]
fn abort_does_not_touch_existing_active_element() {
    let mut c = core();
    let e1 = generate(&mut c, "chest", "logo");
    c.set_prompt("again");
    let ticket = c.begin_generation().unwrap();
    c.abort_generation(ticket).unwrap();
    assert_eq!(c.active_element().map(|e| e.id), Some(e1));
}

#[test]
fn finish_with_stale_ticket_is_rejected() {
    let mut c = core();
    c.select_region("chest").unwrap();
    c.set_prompt("logo");
    let ticket = c.begin_generation().unwrap();
    let stale = GenerationTicket { request_id: Uuid::new_v4(), ..ticket.clone() };

    let err = c.finish_generation(stale, PLACEHOLDER).unwrap_err();
    assert!(matches!(err, EditorError::StaleTicket(_)));
    assert!(c.is_generating());
    assert!(c.elements().is_empty());

    c.finish_generation(ticket, PLACEHOLDER).unwrap();
    assert_eq!(c.elements().len(), 1);
}

#[test]
fn ticket_cannot_be_used_twice() {
    let mut c = core();
    c.select_region("chest").unwrap();
    c.set_prompt("logo");
    let ticket = c.begin_generation().unwrap();
    c.finish_generation(ticket.clone(), PLACEHOLDER).unwrap();
    assert!(c.finish_generation(ticket.clone(), PLACEHOLDER).is_err());
    assert!(c.abort_generation(ticket).is_err());
    assert_eq!(c.elements().len(), 1);
}

// =============================================================
// Active element editing
// =============================================================

#[test]
fn update_active_without_selection() {
    let mut c = core();
    let err = c.update_active(PropertyEdit::Opacity(10.0)).unwrap_err();
    assert_eq!(err, EditorError::NoActiveElement);
    assert_eq!(err.error_code(), "E_NO_ACTIVE_ELEMENT");
}

#[test]
fn update_active_targets_selection_only() {
    let mut c = core();
    let e1 = generate(&mut c, "chest", "one");
    let e2 = generate(&mut c, "back", "two");
    c.set_active(e1).unwrap();
    c.update_active(PropertyEdit::Rotation(30.0)).unwrap();

    assert_eq!(c.doc.get(e1).unwrap().properties.rotation, 30.0);
    assert_eq!(c.doc.get(e2).unwrap().properties.rotation, 0.0);
}

#[test]
fn update_active_out_of_range_maps_to_invalid_value() {
    let mut c = core();
    generate(&mut c, "chest", "logo");
    let err = c.update_active(PropertyEdit::Scale(999.0)).unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_VALUE");
    assert_eq!(c.active_element().unwrap().properties.scale, 100.0);
}

#[test]
fn update_active_named_from_slider() {
    let mut c = core();
    generate(&mut c, "chest", "logo");
    c.update_active_named("brightness", &json!(150)).unwrap();
    c.update_active_named("removeBackground", &json!(true)).unwrap();
    let props = c.active_element().unwrap().properties;
    assert_eq!(props.brightness, 150.0);
    assert!(props.remove_background);
}

#[test]
fn update_active_named_unknown_property() {
    let mut c = core();
    generate(&mut c, "chest", "logo");
    let err = c.update_active_named("hue", &json!(10)).unwrap_err();
    assert_eq!(err.error_code(), "E_UNKNOWN_PROPERTY");
}

#[test]
fn set_active_unknown_is_not_found() {
    let mut c = core();
    let err = c.set_active(ElementId(5)).unwrap_err();
    assert_eq!(err, EditorError::Store(StoreError::NotFound(ElementId(5))));
}

#[test]
fn delete_active_clears_selection() {
    let mut c = core();
    let e1 = generate(&mut c, "chest", "logo");
    let removed = c.delete_active().unwrap();
    assert_eq!(removed.id, e1);
    assert!(c.elements().is_empty());
    assert!(c.active_element().is_none());
}

#[test]
fn delete_active_without_selection() {
    let mut c = core();
    assert_eq!(c.delete_active().unwrap_err(), EditorError::NoActiveElement);
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_chest_logo() {
    let mut c = core();
    let e1 = generate(&mut c, "chest", "logo");
    assert_eq!(c.active_element().map(|e| e.id), Some(e1));
    assert_eq!(c.active_element().unwrap().properties, Properties::default());

    c.update_active(PropertyEdit::Scale(120.0)).unwrap();
    let props = c.active_element().unwrap().properties;
    assert_eq!(props.scale, 120.0);
    assert_eq!(props.opacity, 100.0);

    assert!(c.update_active(PropertyEdit::Scale(999.0)).is_err());
    assert_eq!(c.active_element().unwrap().properties.scale, 120.0);

    c.delete_active().unwrap();
    assert!(c.elements().is_empty());
    assert!(c.active_element().is_none());
}

#[test]
fn scenario_two_regions() {
    let mut c = core();
    let e1 = generate(&mut c, "chest", "one");
    let e2 = generate(&mut c, "back", "two");
    let ids: Vec<ElementId> = c.elements().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![e1, e2]);

    c.set_active(e1).unwrap();
    c.doc.delete_element(e2).unwrap();
    assert_eq!(c.active_element().map(|e| e.id), Some(e1));
}

#[test]
fn scene_tracks_edits() {
    let mut c = core();
    generate(&mut c, "leftSleeve", "stripe");
    c.update_active(PropertyEdit::Rotation(-45.0)).unwrap();
    let scene = c.scene();
    assert_eq!(scene.len(), 1);
    assert!(scene[0].active);
    assert_eq!(scene[0].transform.rotation_deg, -45.0);
    assert_eq!(scene[0].transform.left_pct, 20.0);
}
