//! Design-element state model and transform engine for the garment studio.
//!
//! This crate is synchronous and owns no I/O. It holds the fixed catalog of
//! placement regions on the garment mockup, the store of generated design
//! elements with their adjustable display properties, the session context that
//! gates generation requests, and the pure compositor that turns an element
//! into the transform the presentation layer draws. Producing artwork is the
//! host's job; the host hands the result back through
//! [`engine::EditorCore::finish_generation`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session context: selection, prompt draft, in-flight flag |
//! | [`doc`] | Design elements, the property model, and the element store |
//! | [`regions`] | Static catalog of placement regions |
//! | [`compositor`] | Render transforms and scene composition |
//! | [`error`] | Stable error codes shared by every error type |
//! | [`consts`] | Property ranges, defaults, and catalog data |

pub mod compositor;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod regions;
