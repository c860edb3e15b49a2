//! In-memory text search and categorical filters.
//!
//! # Responsibility
//! - Match free text against a record's listed fields.
//! - Compose text, status and priority predicates into one pass.
//!
//! # Invariants
//! - Output preserves input relative order; nothing is re-sorted.
//! - An empty query matches every record.
//! - A `None` constraint means "no constraint" (the `all` select value).

use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Select value that disables a categorical constraint.
pub const FILTER_ALL: &str = "all";

/// Accessor returning one searchable text field of `T`.
pub type TextField<T> = fn(&T) -> &str;

const TASK_SEARCH_FIELDS: &[TextField<Task>] = &[task_title, task_description];
const PROJECT_SEARCH_FIELDS: &[TextField<Project>] = &[project_name, project_description];
const USER_SEARCH_FIELDS: &[TextField<User>] = &[user_name, user_email];

/// Raw select value could not be mapped to a filter constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownStatus(String),
    UnknownPriority(String),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStatus(value) => write!(f, "unknown status filter `{value}`"),
            Self::UnknownPriority(value) => write!(f, "unknown priority filter `{value}`"),
        }
    }
}

impl Error for FilterError {}

/// Combined task list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Free text matched against title or description.
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Creates a text-only filter.
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    /// Builds a filter from raw select values.
    ///
    /// `"all"`, blank or `None` disables the constraint.
    ///
    /// # Errors
    /// - Returns an error for any other value that is not a known variant.
    pub fn from_form(
        search: impl Into<String>,
        status: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Self, FilterError> {
        let status = match select_value(status) {
            None => None,
            Some(value) => Some(
                TaskStatus::parse(value)
                    .ok_or_else(|| FilterError::UnknownStatus(value.to_string()))?,
            ),
        };
        let priority = match select_value(priority) {
            None => None,
            Some(value) => Some(
                TaskPriority::parse(value)
                    .ok_or_else(|| FilterError::UnknownPriority(value.to_string()))?,
            ),
        };

        Ok(Self {
            search: search.into(),
            status,
            priority,
        })
    }

    /// Returns whether `task` passes every constraint.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
            && matches_text(task, TASK_SEARCH_FIELDS, &self.search)
    }
}

/// Case-insensitive substring match over the listed fields.
///
/// Returns `true` when `query` is empty or any field contains it.
pub fn matches_text<T>(record: &T, fields: &[TextField<T>], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field(record).to_lowercase().contains(&needle))
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Projects whose name or description contains `search`.
pub fn filter_projects<'a>(projects: &'a [Project], search: &str) -> Vec<&'a Project> {
    filter_by_text(projects, PROJECT_SEARCH_FIELDS, search)
}

/// Users whose name or email contains `search`.
pub fn filter_users<'a>(users: &'a [User], search: &str) -> Vec<&'a User> {
    filter_by_text(users, USER_SEARCH_FIELDS, search)
}

fn filter_by_text<'a, T>(records: &'a [T], fields: &[TextField<T>], search: &str) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| matches_text(*record, fields, search))
        .collect()
}

fn task_title(task: &Task) -> &str {
    &task.title
}

fn task_description(task: &Task) -> &str {
    &task.description
}

fn project_name(project: &Project) -> &str {
    &project.name
}

fn project_description(project: &Project) -> &str {
    &project.description
}

fn user_name(user: &User) -> &str {
    &user.name
}

fn user_email(user: &User) -> &str {
    &user.email
}

fn select_value(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && *value != FILTER_ALL)
}
