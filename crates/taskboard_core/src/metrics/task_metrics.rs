//! Aggregates over task collections.
//!
//! # Responsibility
//! - Count tasks by status/priority and derive completion rates.
//! - Derive per-project progress and per-user stats.
//! - Select the most recently updated tasks.
//!
//! # Invariants
//! - Inputs are never mutated.
//! - Every status/priority variant is present in counts (absent means 0).
//! - Percentages round half-up and are 0 for empty collections.
//! - Time-sensitive functions take `now` explicitly.

use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task count per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.completed
    }

    /// Yields `(status, count)` for every status, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, usize)> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    fn bump(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Todo => self.todo += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }
}

/// Task count per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: TaskPriority) -> usize {
        match priority {
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskPriority, usize)> + '_ {
        TaskPriority::ALL
            .into_iter()
            .map(move |priority| (priority, self.get(priority)))
    }
}

/// Completion numbers for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub completed: usize,
    pub total: usize,
    /// Whole percent in `0..=100`, rounded half-up.
    pub percent: u8,
}

/// Completion numbers for one assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskStats {
    pub total: usize,
    pub completed: usize,
    pub completion_rate_percent: u8,
}

pub fn count_by_status(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        counts.bump(task.status);
    }
    counts
}

pub fn count_by_priority(tasks: &[Task]) -> PriorityCounts {
    let mut counts = PriorityCounts::default();
    for task in tasks {
        match task.priority {
            TaskPriority::High => counts.high += 1,
            TaskPriority::Medium => counts.medium += 1,
            TaskPriority::Low => counts.low += 1,
        }
    }
    counts
}

/// Fraction of completed tasks in `[0, 1]`.
///
/// Returns `0.0` for an empty collection.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    completed as f64 / tasks.len() as f64
}

/// Number of open tasks whose deadline is strictly before `now`.
pub fn overdue_count(tasks: &[Task], now: DateTime<Utc>) -> usize {
    tasks.iter().filter(|task| task.is_overdue(now)).count()
}

/// Progress of the tasks pointing at `project`.
pub fn project_progress(project: &Project, tasks: &[Task]) -> ProjectProgress {
    let (completed, total) =
        completed_and_total(tasks.iter().filter(|task| task.project_id == project.id));
    ProjectProgress {
        completed,
        total,
        percent: rounded_percent(completed, total),
    }
}

/// Stats of the tasks assigned to `user_id`.
pub fn user_task_stats(user_id: &str, tasks: &[Task]) -> UserTaskStats {
    let (completed, total) =
        completed_and_total(tasks.iter().filter(|task| task.assignee.id == user_id));
    UserTaskStats {
        total,
        completed,
        completion_rate_percent: rounded_percent(completed, total),
    }
}

/// Up to `n` tasks ordered by `updated_at` descending.
///
/// The sort is stable: tasks with equal `updated_at` keep input order.
pub fn recent_tasks(tasks: &[Task], n: usize) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
    sorted.truncate(n);
    sorted
}

/// Whole percentage of `part / total`, rounded half-up.
///
/// Uses integer arithmetic so `1/8` (12.5%) always yields 13. Returns 0 when
/// `total` is 0 and saturates at 100.
pub fn rounded_percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u128;
    let total = total as u128;
    let percent = (part * 200 + total) / (total * 2);
    percent.min(100) as u8
}

fn completed_and_total<'a>(tasks: impl Iterator<Item = &'a Task>) -> (usize, usize) {
    tasks.fold((0, 0), |(completed, total), task| {
        (completed + usize::from(task.is_completed()), total + 1)
    })
}
