//! Report handoff
//!
//! The completed report is written to a durable key/value slot as JSON text
//! for a separate report viewer to pick up.

mod store;

pub use store::{FileHandoffStore, HandoffStore, MemoryHandoffStore, REPORT_KEY};
