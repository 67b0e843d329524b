//! Session-level workflows.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the multi-step flows that cross the sync editor core
//! and the async generation edge, so hosts only translate their own events
//! into calls here.

pub mod design;
