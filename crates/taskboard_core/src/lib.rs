//! Core domain logic for the taskboard dashboard.
//! This crate is the single source of truth for derived metrics, list
//! filtering, inbox state and creation-form rules.

pub mod logging;
pub mod metrics;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
    LoggingError,
};
pub use metrics::dashboard::{
    dashboard_summary, team_overview, DashboardOptions, DashboardSummary, ProjectProgressRow,
    TeamMemberStats,
};
pub use metrics::task_metrics::{
    completion_rate, count_by_priority, count_by_status, overdue_count, project_progress,
    recent_tasks, rounded_percent, user_task_stats, PriorityCounts, ProjectProgress,
    StatusCounts, UserTaskStats,
};
pub use model::notification::{Notification, NotificationId, NotificationKind};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use model::task::{
    Comment, CommentId, Task, TaskId, TaskPriority, TaskStatus, TaskValidationError,
};
pub use model::user::{User, UserId, UserRole};
pub use search::filter::{
    filter_projects, filter_tasks, filter_users, matches_text, FilterError, TaskFilter,
    TextField, FILTER_ALL,
};
pub use service::draft::{
    parse_deadline, DraftService, FieldError, FormField, IdGenerator, ProjectForm,
    SequentialIdGenerator, TaskForm, UuidIdGenerator, ValidationErrors, ValidationRule,
};
pub use service::inbox::{
    mark_all_read, mark_read, reduce, relative_age, unread_count, InboxAction, RelativeAge,
};
pub use store::snapshot::{load_snapshot, parse_snapshot, EntitySnapshot};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
