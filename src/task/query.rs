//! Filtering and ordering of task lists.
//!
//! The pipeline runs in a fixed order: title filter, tag filter, pinned
//! ordering, then the optional criterion sort. Pinned tasks always stay
//! ahead of unpinned ones; the criterion only orders tasks within each group.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::task::Task;

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Priority,
}

impl SortKey {
    /// Parse the `sort-by` parameter. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "due-date" => Some(Self::DueDate),
            "priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse the `sort-order` parameter. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    /// A sort applies only when both parameters are present and recognised.
    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>) -> Option<Self> {
        Some(Self {
            key: SortKey::parse(sort_by?)?,
            order: SortOrder::parse(sort_order?)?,
        })
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self.key {
            SortKey::DueDate => compare_present_first(a.due_date, b.due_date, self.order),
            SortKey::Priority => compare_present_first(a.priority, b.priority, self.order),
        }
    }
}

/// Query-string parameters of the listing page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(rename = "titleQ", default)]
    pub title_q: Option<String>,
    #[serde(rename = "tagQ", default)]
    pub tag_q: Option<String>,
    #[serde(rename = "sort-by", default)]
    pub sort_by: Option<String>,
    #[serde(rename = "sort-order", default)]
    pub sort_order: Option<String>,
}

/// Parsed listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub title: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<SortSpec>,
}

impl From<&ListParams> for TaskQuery {
    fn from(params: &ListParams) -> Self {
        Self {
            title: non_empty(params.title_q.as_deref()),
            tag: non_empty(params.tag_q.as_deref()),
            sort: SortSpec::from_params(params.sort_by.as_deref(), params.sort_order.as_deref()),
        }
    }
}

impl TaskQuery {
    /// Run the full pipeline over `tasks`.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut tasks = tasks;
        if let Some(title) = &self.title {
            tasks = filter_by_title(tasks, title);
            tracing::debug!(
                "Filtered task titles: {:?}",
                tasks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>()
            );
        }
        if let Some(tag) = &self.tag {
            tasks = filter_by_tag(tasks, tag);
        }
        let tasks = pinned_first(tasks);
        match self.sort {
            Some(spec) => sort_tasks(tasks, spec),
            None => tasks,
        }
    }
}

/// Keep tasks whose title contains `query`, ignoring case.
pub fn filter_by_title(tasks: Vec<Task>, query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    tasks
        .into_iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .collect()
}

/// Keep tasks with at least one tag containing `query`, ignoring case.
pub fn filter_by_tag(tasks: Vec<Task>, query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    tasks
        .into_iter()
        .filter(|t| t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle)))
        .collect()
}

/// Stable partition: pinned tasks first, input order kept inside each group.
pub fn pinned_first(tasks: Vec<Task>) -> Vec<Task> {
    let mut tasks = tasks;
    tasks.sort_by_key(|t| !t.pinned);
    tasks
}

/// Stable sort by `spec`, keeping pinned tasks ahead of unpinned ones.
pub fn sort_tasks(tasks: Vec<Task>, spec: SortSpec) -> Vec<Task> {
    let mut tasks = tasks;
    tasks.sort_by(|a, b| b.pinned.cmp(&a.pinned).then_with(|| spec.compare(a, b)));
    tasks
}

/// Present values are ordered by `order`; absent ones go last either way.
fn compare_present_first<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn query(sort_by: &str, sort_order: &str) -> TaskQuery {
        TaskQuery::from(&ListParams {
            sort_by: Some(sort_by.to_string()),
            sort_order: Some(sort_order.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_title_filter_case_insensitive_substring() {
        let tasks = vec![Task::new("Buy Milk"), Task::new("Call mom")];
        let q = TaskQuery {
            title: Some("milk".to_string()),
            ..Default::default()
        };

        assert_eq!(titles(&q.apply(tasks)), vec!["Buy Milk"]);
    }

    #[test]
    fn test_tag_filter_matches_any_tag() {
        let tasks = vec![
            Task::new("a").with_tags(["Home", "Errand"]),
            Task::new("b").with_tags(["work"]),
            Task::new("c"),
        ];

        let filtered = filter_by_tag(tasks, "ERR");
        assert_eq!(titles(&filtered), vec!["a"]);
    }

    #[test]
    fn test_filters_combine() {
        let tasks = vec![
            Task::new("Report draft").with_tags(["work"]),
            Task::new("Report taxes").with_tags(["home"]),
            Task::new("Standup").with_tags(["work"]),
        ];
        let q = TaskQuery {
            title: Some("report".to_string()),
            tag: Some("work".to_string()),
            sort: None,
        };

        assert_eq!(titles(&q.apply(tasks)), vec!["Report draft"]);
    }

    #[test]
    fn test_empty_params_are_absent() {
        let q = TaskQuery::from(&ListParams {
            title_q: Some(String::new()),
            tag_q: Some(String::new()),
            sort_by: Some("priority".to_string()),
            sort_order: None,
        });

        assert_eq!(q, TaskQuery::default());
    }

    #[test]
    fn test_pinned_first_is_stable() {
        let tasks = vec![
            Task::new("a"),
            Task::new("b").with_pinned(true),
            Task::new("c"),
            Task::new("d").with_pinned(true),
        ];

        assert_eq!(titles(&pinned_first(tasks)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_pinned_beats_priority() {
        let tasks = vec![
            Task::new("A").with_priority(1),
            Task::new("B").with_priority(5).with_pinned(true),
        ];

        for order in ["asc", "desc"] {
            let sorted = query("priority", order).apply(tasks.clone());
            assert_eq!(titles(&sorted), vec!["B", "A"]);
        }
    }

    #[test]
    fn test_priority_ascending() {
        let tasks = vec![
            Task::new("three").with_priority(3),
            Task::new("one").with_priority(1),
            Task::new("two").with_priority(2),
        ];

        let sorted = query("priority", "asc").apply(tasks);
        assert_eq!(titles(&sorted), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_due_date_descending_within_pinned_groups() {
        let tasks = vec![
            Task::new("early").with_due_date(date(2024, 1, 1)),
            Task::new("pinned-early")
                .with_due_date(date(2024, 2, 1))
                .with_pinned(true),
            Task::new("late").with_due_date(date(2024, 6, 1)),
            Task::new("pinned-late")
                .with_due_date(date(2024, 5, 1))
                .with_pinned(true),
        ];

        let sorted = query("due-date", "desc").apply(tasks);
        assert_eq!(
            titles(&sorted),
            vec!["pinned-late", "pinned-early", "late", "early"]
        );
    }

    #[test]
    fn test_equal_due_dates_keep_input_order() {
        let tasks = vec![
            Task::new("first").with_due_date(date(2024, 3, 3)),
            Task::new("second").with_due_date(date(2024, 3, 3)),
            Task::new("earlier").with_due_date(date(2024, 3, 1)),
        ];

        let sorted = query("due-date", "asc").apply(tasks);
        assert_eq!(titles(&sorted), vec!["earlier", "first", "second"]);
    }

    #[test]
    fn test_absent_values_sort_last() {
        let tasks = vec![
            Task::new("none"),
            Task::new("low").with_priority(1),
            Task::new("high").with_priority(9),
        ];

        let asc = query("priority", "asc").apply(tasks.clone());
        assert_eq!(titles(&asc), vec!["low", "high", "none"]);

        let desc = query("priority", "desc").apply(tasks);
        assert_eq!(titles(&desc), vec!["high", "low", "none"]);
    }

    #[test]
    fn test_unknown_sort_params_keep_pinned_order() {
        let tasks = vec![
            Task::new("b").with_priority(2),
            Task::new("p").with_priority(9).with_pinned(true),
            Task::new("a").with_priority(1),
        ];

        for (by, order) in [("title", "asc"), ("priority", "sideways")] {
            let q = query(by, order);
            assert_eq!(q.sort, None);
            assert_eq!(titles(&q.apply(tasks.clone())), vec!["p", "b", "a"]);
        }
    }
}
