//! Dashboard and team page projections.
//!
//! Bundles the task aggregates into the shapes rendered by the overview
//! cards, the project progress chart and the team grid.

use crate::metrics::task_metrics::{
    count_by_status, overdue_count, project_progress, recent_tasks, rounded_percent,
    user_task_stats, ProjectProgress, StatusCounts, UserTaskStats,
};
use crate::model::project::{Project, ProjectId};
use crate::model::task::{Task, TaskId};
use crate::model::user::{User, UserId};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

const DEFAULT_RECENT_LIMIT: usize = 3;

/// Tunables for [`dashboard_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Number of recently updated tasks to include.
    pub recent_limit: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// One bar of the project progress chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgressRow {
    pub project_id: ProjectId,
    pub name: String,
    pub progress: ProjectProgress,
}

/// Overview numbers for the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub status_counts: StatusCounts,
    pub completion_rate_percent: u8,
    pub overdue: usize,
    pub team_size: usize,
    /// One row per project, in project order.
    pub project_progress: Vec<ProjectProgressRow>,
    /// Most recently updated task ids, newest first.
    pub recent_task_ids: Vec<TaskId>,
}

/// One card of the team grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberStats {
    pub user_id: UserId,
    pub name: String,
    pub initials: String,
    pub stats: UserTaskStats,
}

/// Computes the dashboard overview against the reference time `now`.
pub fn dashboard_summary(
    users: &[User],
    projects: &[Project],
    tasks: &[Task],
    now: DateTime<Utc>,
    options: &DashboardOptions,
) -> DashboardSummary {
    let status_counts = count_by_status(tasks);
    let project_progress = projects
        .iter()
        .map(|project| ProjectProgressRow {
            project_id: project.id.clone(),
            name: project.name.clone(),
            progress: project_progress(project, tasks),
        })
        .collect();
    let recent_task_ids = recent_tasks(tasks, options.recent_limit)
        .into_iter()
        .map(|task| task.id.clone())
        .collect();

    let summary = DashboardSummary {
        total_tasks: tasks.len(),
        status_counts,
        completion_rate_percent: rounded_percent(status_counts.completed, tasks.len()),
        overdue: overdue_count(tasks, now),
        team_size: users.len(),
        project_progress,
        recent_task_ids,
    };

    debug!(
        "event=dashboard_summary module=metrics status=ok tasks={} projects={} overdue={}",
        summary.total_tasks,
        projects.len(),
        summary.overdue
    );
    summary
}

/// Per-user task stats in user order.
pub fn team_overview(users: &[User], tasks: &[Task]) -> Vec<TeamMemberStats> {
    users
        .iter()
        .map(|user| TeamMemberStats {
            user_id: user.id.clone(),
            name: user.name.clone(),
            initials: user.initials(),
            stats: user_task_stats(&user.id, tasks),
        })
        .collect()
}
