//! Dreamlab: AI artwork placement for garment mockups.
//!
//! DESIGN
//! ======
//! The synchronous design model (regions, elements, transforms) lives in the
//! `studio` crate. This crate adds the asynchronous edge: requesting artwork
//! from a generation backend, and the per-session service that threads a
//! generation result back into the editor state.
//!
//! | Module | Role |
//! |--------|------|
//! | [`generation`] | Backend contract, placeholder and HTTP backends, requestor |
//! | [`state`] | One editor session: editor core plus its requestor |
//! | [`services`] | Session-level workflows (generate → create element) |

pub mod generation;
pub mod services;
pub mod state;

pub use studio;
