//! Task stores.
//!
//! - `files`: tasks re-read from a directory of JSON files on every request
//! - `memory`: tasks added during the current run, lost on restart

mod files;
mod memory;

pub use files::{LoadReport, StoreError, TaskFiles};
pub use memory::{SharedTaskStore, TaskStore};
