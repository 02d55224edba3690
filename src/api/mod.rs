//! HTTP surface: task pages, static assets and health check.

mod routes;
mod tasks;
mod views;

pub use routes::{router, serve, AppState, HealthResponse};
pub use tasks::SERVER_ERROR_BODY;
pub use views::{ViewError, Views};
