//! Project/task creation form validation.
//!
//! # Responsibility
//! - Turn raw form fields into fully populated draft entities.
//! - Report every violated rule in one pass, keyed by field.
//!
//! # Invariants
//! - A call returns either a draft or a non-empty error list, never both.
//! - Missing values and dangling references are distinct rules.
//! - Ids come from the injected `IdGenerator`; timestamps from `now`.
//! - The entity store is never mutated here; insertion is the caller's job.

use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::User;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// `datetime-local` input layouts accepted in addition to RFC 3339.
const DATETIME_LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Source of ids for newly created entities.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random v4 UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` ids, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    issued: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issued: Cell::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        format!("{}-{next}", self.prefix)
    }
}

/// Form field a validation rule is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Title,
    Priority,
    Status,
    AssigneeId,
    ProjectId,
    Deadline,
}

impl FormField {
    /// Field key as used by the form inputs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::AssigneeId => "assigneeId",
            Self::ProjectId => "projectId",
            Self::Deadline => "deadline",
        }
    }
}

/// Violated rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Value is missing or blank after trim.
    Required,
    /// Value is not one of the enum's variants.
    UnknownVariant(String),
    /// Id does not resolve to an existing record.
    UnknownReference(String),
    /// Value cannot be parsed.
    InvalidFormat(String),
}

/// One field-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub rule: ValidationRule,
}

impl FieldError {
    fn new(field: FormField, rule: ValidationRule) -> Self {
        Self { field, rule }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field.as_str();
        match &self.rule {
            ValidationRule::Required => write!(f, "{field} is required"),
            ValidationRule::UnknownVariant(value) => {
                write!(f, "{field} has unknown value `{value}`")
            }
            ValidationRule::UnknownReference(id) => {
                write!(f, "{field} references unknown id `{id}`")
            }
            ValidationRule::InvalidFormat(value) => {
                write!(f, "{field} has invalid format `{value}`")
            }
        }
    }
}

/// Non-empty list of field failures, in form field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Never true for a returned error list.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rule violated by `field`, if any.
    pub fn rule_for(&self, field: FormField) -> Option<&ValidationRule> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| &error.rule)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    fn field_keys(&self) -> String {
        self.errors
            .iter()
            .map(|error| error.field.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl Error for ValidationErrors {}

/// Raw input of the "new project" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectForm {
    pub name: String,
    pub description: Option<String>,
    /// Wire value; defaults to `active` when absent or blank.
    pub status: Option<String>,
}

/// Raw input of the "new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    /// Wire value; defaults to `medium` when absent or blank.
    pub priority: Option<String>,
    /// Wire value; defaults to `todo` when absent or blank.
    pub status: Option<String>,
    pub assignee_id: String,
    pub project_id: String,
    /// RFC 3339 or `datetime-local` (`YYYY-MM-DDTHH:MM[:SS]`, read as UTC).
    pub deadline: String,
}

/// Draft construction service over an id source.
pub struct DraftService<G: IdGenerator> {
    ids: G,
}

impl<G: IdGenerator> DraftService<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Validates `form` and builds a project stamped with `now`.
    ///
    /// # Errors
    /// - `name` blank after trim -> `Required`.
    /// - `status` not a known variant -> `UnknownVariant`.
    pub fn create_project(
        &self,
        form: &ProjectForm,
        now: DateTime<Utc>,
    ) -> Result<Project, ValidationErrors> {
        let mut errors = Vec::new();

        let name = form.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(FormField::Name, ValidationRule::Required));
        }
        let status = parse_optional_variant(
            form.status.as_deref(),
            FormField::Status,
            ProjectStatus::parse,
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(reject("project_draft", errors));
        }

        let project = Project {
            id: self.ids.next_id(),
            name: name.to_string(),
            description: trimmed_or_empty(form.description.as_deref()),
            status,
            members: Vec::new(),
            created_at: now,
        };
        info!(
            "event=project_draft module=draft status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    /// Validates `form` against known `users`/`projects` and builds a task.
    ///
    /// # Errors
    /// - `title` blank -> `Required`.
    /// - `priority`/`status` not a known variant -> `UnknownVariant`.
    /// - `assigneeId`/`projectId` blank -> `Required`; unresolved ->
    ///   `UnknownReference`.
    /// - `deadline` blank -> `Required`; unparseable -> `InvalidFormat`.
    pub fn create_task(
        &self,
        form: &TaskForm,
        users: &[User],
        projects: &[Project],
        now: DateTime<Utc>,
    ) -> Result<Task, ValidationErrors> {
        let mut errors = Vec::new();

        let title = form.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new(FormField::Title, ValidationRule::Required));
        }
        let priority = parse_optional_variant(
            form.priority.as_deref(),
            FormField::Priority,
            TaskPriority::parse,
            &mut errors,
        );
        let status = parse_optional_variant(
            form.status.as_deref(),
            FormField::Status,
            TaskStatus::parse,
            &mut errors,
        );
        let assignee = resolve_reference(
            &form.assignee_id,
            FormField::AssigneeId,
            |id| users.iter().find(|user| user.id == id),
            &mut errors,
        );
        let project = resolve_reference(
            &form.project_id,
            FormField::ProjectId,
            |id| projects.iter().find(|project| project.id == id),
            &mut errors,
        );
        let deadline = match form.deadline.trim() {
            "" => {
                errors.push(FieldError::new(FormField::Deadline, ValidationRule::Required));
                None
            }
            raw => {
                let parsed = parse_deadline(raw);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        FormField::Deadline,
                        ValidationRule::InvalidFormat(raw.to_string()),
                    ));
                }
                parsed
            }
        };

        let (Some(assignee), Some(project), Some(deadline)) = (assignee, project, deadline) else {
            return Err(reject("task_draft", errors));
        };
        if !errors.is_empty() {
            return Err(reject("task_draft", errors));
        }

        let task = Task {
            id: self.ids.next_id(),
            title: title.to_string(),
            description: trimmed_or_empty(form.description.as_deref()),
            priority,
            status,
            assignee: assignee.clone(),
            project_id: project.id.clone(),
            deadline,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
        };
        info!(
            "event=task_draft module=draft status=ok task_id={} project_id={}",
            task.id, task.project_id
        );
        Ok(task)
    }
}

/// Parses a deadline from RFC 3339 or `datetime-local` input.
///
/// `datetime-local` values carry no offset and are interpreted as UTC.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn reject(event: &str, errors: Vec<FieldError>) -> ValidationErrors {
    let rejected = ValidationErrors { errors };
    debug!(
        "event={event} module=draft status=rejected fields={}",
        rejected.field_keys()
    );
    rejected
}

fn parse_optional_variant<V: Default>(
    raw: Option<&str>,
    field: FormField,
    parse: fn(&str) -> Option<V>,
    errors: &mut Vec<FieldError>,
) -> V {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return V::default();
    };
    parse(value).unwrap_or_else(|| {
        errors.push(FieldError::new(
            field,
            ValidationRule::UnknownVariant(value.to_string()),
        ));
        V::default()
    })
}

fn resolve_reference<'a, T>(
    raw: &str,
    field: FormField,
    lookup: impl Fn(&str) -> Option<&'a T>,
    errors: &mut Vec<FieldError>,
) -> Option<&'a T> {
    let id = raw.trim();
    if id.is_empty() {
        errors.push(FieldError::new(field, ValidationRule::Required));
        return None;
    }
    let found = lookup(id);
    if found.is_none() {
        errors.push(FieldError::new(
            field,
            ValidationRule::UnknownReference(id.to_string()),
        ));
    }
    found
}

fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
