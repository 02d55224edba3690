//! Task page handlers.
//!
//! - `GET /` - filtered, sorted listing of saved and added tasks
//! - `GET /add` - blank add-task form
//! - `POST /add` - append a task to the in-memory store

use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::task::{AddTaskForm, ListParams, Task, TaskQuery, TaskRecord};

use super::routes::AppState;
use super::views::ViewError;

/// Body sent with every 500; details only go to the log.
pub const SERVER_ERROR_BODY: &str = "Server Error";

fn internal_error(context: &str, err: ViewError) -> (StatusCode, String) {
    tracing::error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        SERVER_ERROR_BODY.to_string(),
    )
}

/// GET / - Render the task listing.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    let mut tasks = state.saved.load_or_empty().await;
    tasks.extend(state.added.list().await);
    tracing::debug!(
        "Combined task titles: {:?}",
        tasks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>()
    );

    let query = TaskQuery::from(&params);
    let tasks = query.apply(tasks);

    state
        .views
        .home(&tasks, &params)
        .map(Html)
        .map_err(|e| internal_error("Error rendering task list", e))
}

/// GET /add - Render the blank add-task form.
pub async fn new_task_form(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    state
        .views
        .new_task()
        .map(Html)
        .map_err(|e| internal_error("Error rendering task form", e))
}

/// POST /add - Store a submitted task and go back to the listing.
///
/// Submissions are never rejected; loose fields are coerced to empty or
/// absent values.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddTaskForm>,
) -> Response {
    let task = Task::from(TaskRecord::from(form));
    let title = task.title.clone();
    let count = state.added.add(task).await;
    tracing::info!("Added task {:?} ({} added this run)", title, count);
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
