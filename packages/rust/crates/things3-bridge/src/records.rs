//! Record shapes returned by the query operations.
//!
//! Every value is a string. Dates keep the host's own rendering and tags stay
//! a single comma-joined field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Untyped flat record: field name to string value.
pub type FlatRecord = BTreeMap<String, String>;

/// Separator used when joining tag names into the `tags` field.
pub const TAG_SEPARATOR: &str = ", ";

/// A to-do from the Inbox or Today list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// To-do name; the key mutations match on.
    pub title: String,
    /// Notes, empty when absent.
    #[serde(default)]
    pub notes: String,
    /// Deadline as rendered by the host, empty when absent.
    #[serde(default)]
    pub due_date: String,
    /// Activation ("when") date as rendered by the host, empty when absent.
    #[serde(default)]
    pub when: String,
    /// Comma-joined tag names, empty when untagged.
    #[serde(default)]
    pub tags: String,
    /// Start date; only the Today query carries this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl TaskRecord {
    /// Split `tags` into individual tag names.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// A project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project name.
    pub title: String,
    /// Notes, empty when absent.
    #[serde(default)]
    pub notes: String,
}

/// An area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRecord {
    /// Area name.
    pub title: String,
}

/// A to-do currently selected in the Things3 window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTodoRecord {
    /// To-do name.
    pub title: String,
    /// Notes, empty when absent.
    #[serde(default)]
    pub notes: String,
}
