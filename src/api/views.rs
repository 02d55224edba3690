//! HTML views rendered with embedded templates.

use minijinja::{context, Environment};
use thiserror::Error;

use crate::task::{ListParams, Task};

const LAYOUT: &str = "layout.html";
const HOME: &str = "home.html";
const NEW_TASK: &str = "newtask.html";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to load template {name}: {source}")]
    Load {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// Template environment for every page the server renders.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ViewError> {
        let mut env = Environment::new();
        for (name, source) in [
            (LAYOUT, include_str!("../../templates/layout.html")),
            (HOME, include_str!("../../templates/home.html")),
            (NEW_TASK, include_str!("../../templates/newtask.html")),
        ] {
            env.add_template(name, source)
                .map_err(|source| ViewError::Load { name, source })?;
        }
        Ok(Self { env })
    }

    /// The task listing, with the current query echoed into the filter form.
    pub fn home(&self, tasks: &[Task], query: &ListParams) -> Result<String, ViewError> {
        self.render(HOME, context! { tasks, query })
    }

    /// The blank add-task form.
    pub fn new_task(&self) -> Result<String, ViewError> {
        self.render(NEW_TASK, context! {})
    }

    fn render(&self, name: &'static str, ctx: minijinja::Value) -> Result<String, ViewError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|source| ViewError::Render { name, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lists_tasks() {
        let views = Views::new().unwrap();
        let tasks = vec![
            Task::new("Buy Milk").with_tags(["home"]).with_priority(0),
            Task::new("Ship release").with_pinned(true),
        ];

        let html = views.home(&tasks, &ListParams::default()).unwrap();

        assert!(html.contains("Buy Milk"));
        assert!(html.contains("Ship release"));
        assert!(html.contains("<li>home</li>"));
        assert!(html.contains("<dd>0</dd>"));
        assert!(!html.contains("No tasks found."));
    }

    #[test]
    fn test_home_empty() {
        let views = Views::new().unwrap();
        let html = views.home(&[], &ListParams::default()).unwrap();
        assert!(html.contains("No tasks found."));
    }

    #[test]
    fn test_home_escapes_titles() {
        let views = Views::new().unwrap();
        let tasks = vec![Task::new("<script>alert(1)</script>")];

        let html = views.home(&tasks, &ListParams::default()).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_home_echoes_query() {
        let views = Views::new().unwrap();
        let query = ListParams {
            title_q: Some("milk".to_string()),
            sort_by: Some("priority".to_string()),
            ..Default::default()
        };

        let html = views.home(&[], &query).unwrap();

        assert!(html.contains(r#"name="titleQ" value="milk""#));
        assert!(html.contains(r#"<option value="priority" selected>"#));
    }

    #[test]
    fn test_new_task_form() {
        let views = Views::new().unwrap();

        let html = views.new_task().unwrap();

        assert!(html.contains(r#"action="/add""#));
        assert!(html.contains(r#"name="tags""#));
        assert!(!html.contains("required"));
    }
}
