use chrono::{DateTime, Duration, TimeZone, Utc};
use taskboard_core::{
    completion_rate, count_by_priority, count_by_status, dashboard_summary, overdue_count,
    parse_snapshot, project_progress, recent_tasks, team_overview, user_task_stats,
    DashboardOptions, Project, ProjectStatus, Task, TaskPriority, TaskStatus, User, UserRole,
};

const BOARD_JSON: &str = include_str!("fixtures/board.json");

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
}

fn user(id: &str) -> User {
    User::new(id, format!("User {id}"), format!("{id}@example.com"), UserRole::TeamMember)
}

fn task(id: &str, status: TaskStatus, priority: TaskPriority) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: String::new(),
        priority,
        status,
        assignee: user("u1"),
        project_id: "p1".to_string(),
        deadline: at(10, 12),
        created_at: at(1, 9),
        updated_at: at(1, 9),
        comments: Vec::new(),
    }
}

fn project(id: &str) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        description: String::new(),
        status: ProjectStatus::Active,
        members: Vec::new(),
        created_at: at(1, 0),
    }
}

fn mixed_tasks() -> Vec<Task> {
    vec![
        task("t1", TaskStatus::Todo, TaskPriority::High),
        task("t2", TaskStatus::InProgress, TaskPriority::Medium),
        task("t3", TaskStatus::Completed, TaskPriority::Medium),
        task("t4", TaskStatus::Todo, TaskPriority::Low),
        task("t5", TaskStatus::Completed, TaskPriority::High),
    ]
}

#[test]
fn status_counts_cover_every_task() {
    for tasks in [Vec::new(), mixed_tasks(), mixed_tasks()[..2].to_vec()] {
        let counts = count_by_status(&tasks);
        assert_eq!(counts.total(), tasks.len());
        assert_eq!(counts.iter().map(|(_, count)| count).sum::<usize>(), tasks.len());
    }

    let counts = count_by_status(&mixed_tasks());
    assert_eq!(counts.get(TaskStatus::Todo), 2);
    assert_eq!(counts.get(TaskStatus::InProgress), 1);
    assert_eq!(counts.get(TaskStatus::Completed), 2);
}

#[test]
fn absent_statuses_and_priorities_count_as_zero() {
    let tasks = vec![task("t1", TaskStatus::Todo, TaskPriority::Low)];

    let statuses = count_by_status(&tasks);
    assert_eq!(statuses.iter().count(), 3);
    assert_eq!(statuses.get(TaskStatus::Completed), 0);

    let priorities = count_by_priority(&tasks);
    assert_eq!(priorities.get(TaskPriority::Low), 1);
    assert_eq!(priorities.get(TaskPriority::High), 0);
    assert_eq!(priorities.get(TaskPriority::Medium), 0);
    assert_eq!(priorities.total(), 1);
}

#[test]
fn completion_rate_is_zero_for_empty_and_exact_otherwise() {
    assert_eq!(completion_rate(&[]), 0.0);
    assert_eq!(completion_rate(&mixed_tasks()), 2.0 / 5.0);

    let all_done = vec![task("t1", TaskStatus::Completed, TaskPriority::Low)];
    assert_eq!(completion_rate(&all_done), 1.0);
}

#[test]
fn overdue_count_ignores_completed_tasks() {
    let tasks = mixed_tasks();
    let long_after = at(10, 12) + Duration::days(365);
    assert_eq!(overdue_count(&tasks, long_after), 3);
    assert_eq!(overdue_count(&tasks, at(10, 12)), 0);
}

#[test]
fn overdue_count_never_decreases_as_now_advances() {
    let mut tasks = mixed_tasks();
    for (offset, task) in tasks.iter_mut().enumerate() {
        task.deadline = at(5, 0) + Duration::hours(offset as i64 * 7);
    }

    let mut previous = 0;
    for step in 0..60 {
        let now = at(4, 0) + Duration::hours(step);
        let current = overdue_count(&tasks, now);
        assert!(current >= previous, "count dropped at step {step}");
        previous = current;
    }
    assert_eq!(previous, 3);
}

#[test]
fn project_progress_rounds_one_of_three_to_33() {
    let mut tasks = vec![
        task("t1", TaskStatus::Completed, TaskPriority::Low),
        task("t2", TaskStatus::Todo, TaskPriority::Low),
        task("t3", TaskStatus::InProgress, TaskPriority::Low),
        task("t4", TaskStatus::Completed, TaskPriority::Low),
    ];
    tasks[3].project_id = "p2".to_string();

    let progress = project_progress(&project("p1"), &tasks);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.total, 3);
    assert_eq!(progress.percent, 33);

    let other = project_progress(&project("p2"), &tasks);
    assert_eq!(other.percent, 100);

    let empty = project_progress(&project("p3"), &tasks);
    assert_eq!((empty.completed, empty.total, empty.percent), (0, 0, 0));
}

#[test]
fn user_task_stats_filter_by_assignee() {
    let mut tasks = mixed_tasks();
    tasks[0].assignee = user("u2");
    tasks[2].assignee = user("u2");

    let stats = user_task_stats("u2", &tasks);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completion_rate_percent, 50);

    let nobody = user_task_stats("missing", &tasks);
    assert_eq!(nobody.total, 0);
    assert_eq!(nobody.completion_rate_percent, 0);
}

#[test]
fn recent_tasks_sorts_descending_and_keeps_tie_order() {
    let mut tasks = mixed_tasks();
    tasks[0].updated_at = at(3, 0);
    tasks[1].updated_at = at(5, 0);
    tasks[2].updated_at = at(3, 0);
    tasks[3].updated_at = at(4, 0);
    tasks[4].updated_at = at(3, 0);

    let ids: Vec<&str> = recent_tasks(&tasks, 10)
        .into_iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, vec!["t2", "t4", "t1", "t3", "t5"]);

    let top: Vec<&str> = recent_tasks(&tasks, 3)
        .into_iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(top, vec!["t2", "t4", "t1"]);
    assert!(recent_tasks(&tasks, 0).is_empty());
}

#[test]
fn recent_tasks_is_idempotent_on_sorted_input() {
    let mut tasks = mixed_tasks();
    tasks[1].updated_at = at(8, 0);
    tasks[3].updated_at = at(8, 0);

    let once: Vec<Task> = recent_tasks(&tasks, tasks.len())
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<Task> = recent_tasks(&once, once.len())
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(once, twice);
}

#[test]
fn dashboard_summary_over_fixture_dataset() {
    let snapshot = parse_snapshot(BOARD_JSON).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 2, 6, 0, 0, 0).unwrap();

    let summary = dashboard_summary(
        &snapshot.users,
        &snapshot.projects,
        &snapshot.tasks,
        now,
        &DashboardOptions::default(),
    );

    assert_eq!(summary.total_tasks, 4);
    assert_eq!(summary.status_counts.todo, 2);
    assert_eq!(summary.status_counts.in_progress, 1);
    assert_eq!(summary.status_counts.completed, 1);
    assert_eq!(summary.completion_rate_percent, 25);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.team_size, 3);
    assert_eq!(summary.recent_task_ids, vec!["t2", "t4", "t1"]);

    let progress: Vec<(&str, u8)> = summary
        .project_progress
        .iter()
        .map(|row| (row.project_id.as_str(), row.progress.percent))
        .collect();
    assert_eq!(progress, vec![("p1", 33), ("p2", 0)]);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["completionRatePercent"], 25);
    assert_eq!(json["statusCounts"]["in_progress"], 1);
}

#[test]
fn team_overview_lists_every_user_in_order() {
    let snapshot = parse_snapshot(BOARD_JSON).unwrap();
    let team = team_overview(&snapshot.users, &snapshot.tasks);

    let rows: Vec<(&str, &str, usize, u8)> = team
        .iter()
        .map(|row| {
            (
                row.user_id.as_str(),
                row.initials.as_str(),
                row.stats.total,
                row.stats.completion_rate_percent,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![("u1", "JD", 1, 0), ("u2", "JS", 1, 100), ("u3", "MJ", 2, 0)]
    );
}
