//! Core task types.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single to-do item.
///
/// Built once from a [`TaskRecord`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Empty when the source had no title
    pub title: String,
    /// Absent when the source had no date or one that could not be parsed
    pub due_date: Option<NaiveDate>,
    /// Absent when the source had no priority or a non-numeric one
    pub priority: Option<i64>,
    pub pinned: bool,
    pub tags: Vec<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            priority: None,
            pinned: false,
            tags: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Priority as it appears in input: task files usually carry a number,
/// forms always carry text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl Priority {
    /// Integer value, if any, read the way `parseInt` reads it: floats are
    /// truncated toward zero, text yields its leading integer. Values outside
    /// the `i64` range count as absent.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Float(f) => truncate_float(*f),
            Self::Text(s) => parse_int_prefix(s),
            Self::Other(_) => None,
        }
    }
}

/// Loosely-typed task input, as stored in task files.
///
/// Every field is optional and converting to a [`Task`] never fails:
/// missing or malformed values are coerced to empty or absent ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Pinned only for `true` or the string `"true"`
    #[serde(default)]
    pub pinned: Option<Value>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let title = record.title.unwrap_or_default();

        let due_date = record.due_date.as_deref().and_then(|raw| {
            let parsed = parse_due_date(raw);
            if parsed.is_none() {
                tracing::debug!("Ignoring unparseable due date {:?} on task {:?}", raw, title);
            }
            parsed
        });

        let priority = record.priority.as_ref().and_then(|p| {
            let value = p.value();
            if value.is_none() {
                tracing::debug!("Ignoring non-numeric priority {:?} on task {:?}", p, title);
            }
            value
        });

        Self {
            title,
            due_date,
            priority,
            pinned: record.pinned.as_ref().is_some_and(is_pinned),
            tags: record.tags.unwrap_or_default(),
        }
    }
}

/// Raw payload of the add-task form. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub pinned: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl From<AddTaskForm> for TaskRecord {
    fn from(form: AddTaskForm) -> Self {
        Self {
            title: form.title,
            due_date: form.due_date,
            priority: form.priority.map(Priority::Text),
            // Only the literal "true" pins a task.
            pinned: Some(Value::Bool(form.pinned.as_deref() == Some("true"))),
            tags: Some(split_tags(form.tags.as_deref())),
        }
    }
}

/// Split a comma-separated tag string, trimming each piece.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => raw.split(',').map(|t| t.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Parse a due date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn is_pinned(value: &Value) -> bool {
    matches!(value, Value::Bool(true)) || value.as_str() == Some("true")
}

fn truncate_float(f: f64) -> Option<i64> {
    let truncated = f.trunc();
    // i64::MAX is not representable as f64; the bound is exclusive
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
