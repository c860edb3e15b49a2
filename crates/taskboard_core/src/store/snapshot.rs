//! In-memory dataset snapshot and JSON loading.

use super::{StoreError, StoreResult};
use crate::model::notification::Notification;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::user::User;
use crate::service::inbox::{reduce, InboxAction};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

/// The four entity collections of one dashboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntitySnapshot {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
}

/// Decodes a snapshot from JSON text and validates it.
///
/// # Errors
/// - `Json` when the text does not match the entity schema.
/// - `Integrity` when cross-record invariants do not hold.
pub fn parse_snapshot(json: &str) -> StoreResult<EntitySnapshot> {
    let snapshot: EntitySnapshot = serde_json::from_str(json)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Reads, decodes and validates a snapshot file.
///
/// # Side effects
/// - Emits `snapshot_load` logging events with duration and status.
pub fn load_snapshot(path: impl AsRef<Path>) -> StoreResult<EntitySnapshot> {
    let started_at = Instant::now();
    info!("event=snapshot_load module=store status=start");

    let result = std::fs::read_to_string(path.as_ref())
        .map_err(StoreError::from)
        .and_then(|text| parse_snapshot(&text));

    match &result {
        Ok(snapshot) => info!(
            "event=snapshot_load module=store status=ok duration_ms={} users={} projects={} tasks={} notifications={}",
            started_at.elapsed().as_millis(),
            snapshot.users.len(),
            snapshot.projects.len(),
            snapshot.tasks.len(),
            snapshot.notifications.len()
        ),
        Err(err) => error!(
            "event=snapshot_load module=store status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

impl EntitySnapshot {
    /// Checks id uniqueness, task references and task timestamps.
    ///
    /// Reports the first violation found.
    pub fn validate(&self) -> StoreResult<()> {
        ensure_unique("user", self.users.iter().map(|user| user.id.as_str()))?;
        ensure_unique(
            "project",
            self.projects.iter().map(|project| project.id.as_str()),
        )?;
        ensure_unique("task", self.tasks.iter().map(|task| task.id.as_str()))?;
        ensure_unique(
            "notification",
            self.notifications
                .iter()
                .map(|notification| notification.id.as_str()),
        )?;

        for task in &self.tasks {
            self.check_task_references(task)
                .map_err(|err| StoreError::Integrity(format!("task {}: {err}", task.id)))?;
            task.validate()
                .map_err(|err| StoreError::Integrity(format!("task {}: {err}", task.id)))?;
        }
        Ok(())
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Tasks pointing at `project_id`, in store order.
    pub fn tasks_for_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .collect()
    }

    /// Appends a validated project draft.
    pub fn insert_project(&mut self, project: Project) -> StoreResult<()> {
        if self.find_project(&project.id).is_some() {
            return Err(StoreError::DuplicateId {
                collection: "project",
                id: project.id,
            });
        }
        info!(
            "event=project_insert module=store status=ok project_id={}",
            project.id
        );
        self.projects.push(project);
        Ok(())
    }

    /// Appends a validated task draft.
    ///
    /// # Errors
    /// - `DuplicateId` when the id is taken.
    /// - `UnknownReference` when the assignee or project no longer exists.
    /// - `Integrity` when `updatedAt` precedes `createdAt`.
    pub fn insert_task(&mut self, task: Task) -> StoreResult<()> {
        if self.tasks.iter().any(|existing| existing.id == task.id) {
            return Err(StoreError::DuplicateId {
                collection: "task",
                id: task.id,
            });
        }
        self.check_task_references(&task)?;
        task.validate()
            .map_err(|err| StoreError::Integrity(format!("task {}: {err}", task.id)))?;
        info!(
            "event=task_insert module=store status=ok task_id={} project_id={}",
            task.id, task.project_id
        );
        self.tasks.push(task);
        Ok(())
    }

    /// Replaces the notification collection with the reducer output.
    pub fn apply_inbox(&mut self, action: &InboxAction) {
        self.notifications = reduce(&self.notifications, action);
    }

    fn check_task_references(&self, task: &Task) -> StoreResult<()> {
        if self.find_user(&task.assignee.id).is_none() {
            return Err(StoreError::UnknownReference {
                field: "assignee",
                id: task.assignee.id.clone(),
            });
        }
        if self.find_project(&task.project_id).is_none() {
            return Err(StoreError::UnknownReference {
                field: "projectId",
                id: task.project_id.clone(),
            });
        }
        Ok(())
    }
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
