//! Taskboard CLI: load a dataset snapshot and print derived views.
//!
//! # Usage
//!
//! ```bash
//! taskboard --data board.json summary --recent 5
//! taskboard --data board.json tasks --status todo --priority high --search docs
//! taskboard --data board.json inbox --mark-all-read
//! ```
//!
//! # Responsibility
//! - Wire `taskboard_core` queries to a terminal for local inspection.
//! - Keep output deterministic when `--now` is supplied.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::{
    dashboard_summary, default_log_level, filter_projects, filter_tasks, filter_users,
    init_logging, load_snapshot, project_progress, relative_age, team_overview, unread_count,
    DashboardOptions, EntitySnapshot, FilterError, InboxAction, LoggingError, ProjectProgress,
    StoreError, TaskFilter, User,
};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(version, about = "Inspect a taskboard dataset snapshot")]
struct Cli {
    /// Dataset snapshot (JSON)
    #[arg(short, long)]
    data: PathBuf,

    /// Reference time for overdue and age computations (RFC 3339)
    #[arg(long)]
    now: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (`trace`, `debug`, `info`, `warn`, `error`)
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard overview numbers
    Summary {
        /// Number of recently updated tasks to list
        #[arg(long, default_value_t = DashboardOptions::default().recent_limit)]
        recent: usize,
    },
    /// Filtered task list
    Tasks {
        #[arg(short, long, default_value = "")]
        search: String,

        /// `all`, `todo`, `in_progress` or `completed`
        #[arg(long, default_value = "all")]
        status: String,

        /// `all`, `high`, `medium` or `low`
        #[arg(long, default_value = "all")]
        priority: String,
    },
    /// Projects with completion progress
    Projects {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Team members with task stats
    Team {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Notifications with unread count
    Inbox {
        /// Mark one notification as read before listing
        #[arg(long, conflicts_with = "mark_all_read")]
        mark_read: Option<String>,

        /// Mark every notification as read before listing
        #[arg(long)]
        mark_all_read: bool,
    },
}

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Store(StoreError),
    Filter(FilterError),
    InvalidNow(String),
    Render(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Filter(err) => write!(f, "{err}"),
            Self::InvalidNow(value) => write!(f, "--now must be RFC 3339, got `{value}`"),
            Self::Render(err) => write!(f, "failed to render output: {err}"),
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<FilterError> for CliError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskRow<'a> {
    id: &'a str,
    title: &'a str,
    status: &'static str,
    priority: &'static str,
    assignee: &'a str,
    project_id: &'a str,
    deadline: DateTime<Utc>,
    overdue: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRow<'a> {
    id: &'a str,
    name: &'a str,
    status: &'static str,
    member_count: usize,
    progress: ProjectProgress,
}

#[derive(Serialize)]
struct NotificationRow<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    read: bool,
    age: String,
}

#[derive(Serialize)]
struct InboxView<'a> {
    unread: usize,
    items: Vec<NotificationRow<'a>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("taskboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let now = resolve_now(cli.now.as_deref())?;
    let mut snapshot = load_snapshot(&cli.data)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Commands::Summary { recent } => {
            let options = DashboardOptions {
                recent_limit: recent,
            };
            let summary = dashboard_summary(
                &snapshot.users,
                &snapshot.projects,
                &snapshot.tasks,
                now,
                &options,
            );
            render(&summary)
        }
        Commands::Tasks {
            search,
            status,
            priority,
        } => {
            let filter = TaskFilter::from_form(search, Some(&status), Some(&priority))?;
            let rows: Vec<TaskRow<'_>> = filter_tasks(&snapshot.tasks, &filter)
                .into_iter()
                .map(|task| TaskRow {
                    id: &task.id,
                    title: &task.title,
                    status: task.status.as_str(),
                    priority: task.priority.as_str(),
                    assignee: &task.assignee.name,
                    project_id: &task.project_id,
                    deadline: task.deadline,
                    overdue: task.is_overdue(now),
                })
                .collect();
            render(&rows)
        }
        Commands::Projects { search } => {
            let rows: Vec<ProjectRow<'_>> = filter_projects(&snapshot.projects, &search)
                .into_iter()
                .map(|project| ProjectRow {
                    id: &project.id,
                    name: &project.name,
                    status: project.status.as_str(),
                    member_count: project.member_count(),
                    progress: project_progress(project, &snapshot.tasks),
                })
                .collect();
            render(&rows)
        }
        Commands::Team { search } => {
            let users: Vec<User> = filter_users(&snapshot.users, &search)
                .into_iter()
                .cloned()
                .collect();
            render(&team_overview(&users, &snapshot.tasks))
        }
        Commands::Inbox {
            mark_read,
            mark_all_read,
        } => {
            if let Some(id) = mark_read {
                snapshot.apply_inbox(&InboxAction::MarkRead(id));
            } else if mark_all_read {
                snapshot.apply_inbox(&InboxAction::MarkAllRead);
            }
            render(&inbox_view(&snapshot, now))
        }
    }
}

fn inbox_view(snapshot: &EntitySnapshot, now: DateTime<Utc>) -> InboxView<'_> {
    InboxView {
        unread: unread_count(&snapshot.notifications),
        items: snapshot
            .notifications
            .iter()
            .map(|notification| NotificationRow {
                id: &notification.id,
                title: &notification.title,
                kind: notification.kind.as_str(),
                read: notification.read,
                age: relative_age(notification.created_at, now).to_string(),
            })
            .collect(),
    }
}

/// Parses `--now`, falling back to the wall clock.
fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    match raw {
        None => Ok(Utc::now()),
        Some(value) => DateTime::parse_from_rfc3339(value.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| CliError::InvalidNow(value.to_string())),
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Summary { .. } => "summary",
        Commands::Tasks { .. } => "tasks",
        Commands::Projects { .. } => "projects",
        Commands::Team { .. } => "team",
        Commands::Inbox { .. } => "inbox",
    }
}
