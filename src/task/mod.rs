//! Task module - the task entity and the query pipeline over task lists.
//!
//! - `task`: the `Task` value, its loose input record and form coercion
//! - `query`: filtering and ordering of merged task sequences
//!
//! Tasks are never mutated once built; every pipeline step consumes a
//! sequence and returns a new one.

pub mod query;
pub mod task;

pub use query::{ListParams, SortKey, SortOrder, SortSpec, TaskQuery};
pub use task::{AddTaskForm, Priority, Task, TaskRecord};
