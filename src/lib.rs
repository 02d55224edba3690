//! # Taskboard
//!
//! A personal task list served as server-rendered HTML.
//!
//! Tasks come from two places:
//! - a directory of JSON task files, re-read on every page view
//! - an in-memory list of tasks added through the form during this run
//!
//! ## Request Flow
//! 1. `GET /` loads saved tasks, appends the added ones
//! 2. Title and tag filters narrow the list
//! 3. Pinned tasks move to the front, then the optional sort applies
//! 4. The result is rendered as HTML
//!
//! ## Modules
//! - `task`: Task type, input coercion and the query pipeline
//! - `store`: File-backed loader and in-memory store
//! - `api`: Routes, handlers and views
//! - `config`: Environment configuration

pub mod api;
pub mod config;
pub mod store;
pub mod task;

pub use config::Config;
