use chrono::{DateTime, TimeZone, Utc};
use taskboard_core::{
    parse_snapshot, DraftService, EntitySnapshot, FormField, ProjectForm, ProjectStatus,
    SequentialIdGenerator, TaskForm, TaskPriority, TaskStatus, ValidationRule,
};

const BOARD_JSON: &str = include_str!("fixtures/board.json");

fn board() -> EntitySnapshot {
    parse_snapshot(BOARD_JSON).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 31, 8, 30, 0).unwrap()
}

fn service() -> DraftService<SequentialIdGenerator> {
    DraftService::new(SequentialIdGenerator::new("draft"))
}

fn valid_task_form() -> TaskForm {
    TaskForm {
        title: "Fix bug".to_string(),
        assignee_id: "u1".to_string(),
        project_id: "p1".to_string(),
        deadline: "2025-01-01T10:00".to_string(),
        ..TaskForm::default()
    }
}

#[test]
fn project_form_applies_defaults_and_trims() {
    let form = ProjectForm {
        name: "  Launch  ".to_string(),
        ..ProjectForm::default()
    };
    let project = service().create_project(&form, now()).unwrap();

    assert_eq!(project.id, "draft-1");
    assert_eq!(project.name, "Launch");
    assert_eq!(project.description, "");
    assert_eq!(project.status, ProjectStatus::Active);
    assert!(project.members.is_empty());
    assert_eq!(project.created_at, now());
}

#[test]
fn project_form_rejects_blank_name_and_unknown_status_together() {
    let form = ProjectForm {
        name: "   ".to_string(),
        description: Some("desc".to_string()),
        status: Some("archived".to_string()),
    };
    let errors = service().create_project(&form, now()).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.rule_for(FormField::Name), Some(&ValidationRule::Required));
    assert_eq!(
        errors.rule_for(FormField::Status),
        Some(&ValidationRule::UnknownVariant("archived".to_string()))
    );
}

#[test]
fn project_form_accepts_explicit_status() {
    let form = ProjectForm {
        name: "Ops".to_string(),
        description: Some("  runbooks ".to_string()),
        status: Some("on_hold".to_string()),
    };
    let project = service().create_project(&form, now()).unwrap();
    assert_eq!(project.status, ProjectStatus::OnHold);
    assert_eq!(project.description, "runbooks");
}

#[test]
fn task_form_with_blank_title_fails_with_exactly_one_error() {
    let board = board();
    let form = TaskForm {
        title: String::new(),
        ..valid_task_form()
    };
    let errors = service()
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].field, FormField::Title);
    assert_eq!(errors.errors()[0].rule, ValidationRule::Required);
}

#[test]
fn task_form_with_unknown_assignee_reports_reference_error() {
    let board = board();
    let form = TaskForm {
        assignee_id: "u-missing".to_string(),
        ..valid_task_form()
    };
    let errors = service()
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.rule_for(FormField::AssigneeId),
        Some(&ValidationRule::UnknownReference("u-missing".to_string()))
    );
}

#[test]
fn task_form_distinguishes_missing_from_dangling_references() {
    let board = board();
    let form = TaskForm {
        assignee_id: String::new(),
        project_id: "p-unknown".to_string(),
        ..valid_task_form()
    };
    let errors = service()
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap_err();

    assert_eq!(
        errors.rule_for(FormField::AssigneeId),
        Some(&ValidationRule::Required)
    );
    assert_eq!(
        errors.rule_for(FormField::ProjectId),
        Some(&ValidationRule::UnknownReference("p-unknown".to_string()))
    );
}

#[test]
fn task_form_collects_every_failure_in_field_order() {
    let board = board();
    let form = TaskForm {
        title: " ".to_string(),
        description: None,
        priority: Some("urgent".to_string()),
        status: Some("blocked".to_string()),
        assignee_id: "nobody".to_string(),
        project_id: String::new(),
        deadline: "someday".to_string(),
    };
    let errors = service()
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap_err();

    let fields: Vec<FormField> = errors.errors().iter().map(|error| error.field).collect();
    assert_eq!(
        fields,
        vec![
            FormField::Title,
            FormField::Priority,
            FormField::Status,
            FormField::AssigneeId,
            FormField::ProjectId,
            FormField::Deadline,
        ]
    );
    assert_eq!(
        errors.rule_for(FormField::Deadline),
        Some(&ValidationRule::InvalidFormat("someday".to_string()))
    );
    assert!(errors.to_string().contains("title is required"));
}

#[test]
fn task_form_requires_deadline() {
    let board = board();
    let form = TaskForm {
        deadline: "   ".to_string(),
        ..valid_task_form()
    };
    let errors = service()
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.rule_for(FormField::Deadline),
        Some(&ValidationRule::Required)
    );
}

#[test]
fn valid_task_form_builds_fully_populated_draft() {
    let board = board();
    let drafts = service();
    let form = TaskForm {
        description: Some("  null pointer on save ".to_string()),
        ..valid_task_form()
    };
    let task = drafts
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap();

    assert_eq!(task.id, "draft-1");
    assert_eq!(task.title, "Fix bug");
    assert_eq!(task.description, "null pointer on save");
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.assignee.id, "u1");
    assert_eq!(task.assignee.name, "John Doe");
    assert_eq!(task.project_id, "p1");
    assert_eq!(
        task.deadline,
        Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(task.created_at, now());
    assert_eq!(task.updated_at, now());
    assert!(task.comments.is_empty());
    assert!(task.validate().is_ok());

    let second = drafts
        .create_task(&valid_task_form(), &board.users, &board.projects, now())
        .unwrap();
    assert_eq!(second.id, "draft-2");
}

#[test]
fn rejected_forms_do_not_consume_ids() {
    let board = board();
    let drafts = service();
    let bad = TaskForm {
        title: String::new(),
        ..valid_task_form()
    };
    assert!(drafts
        .create_task(&bad, &board.users, &board.projects, now())
        .is_err());

    let task = drafts
        .create_task(&valid_task_form(), &board.users, &board.projects, now())
        .unwrap();
    assert_eq!(task.id, "draft-1");
}

#[test]
fn task_form_decodes_from_camel_case_json() {
    let form: TaskForm = serde_json::from_value(serde_json::json!({
        "title": "Fix bug",
        "assigneeId": "u2",
        "projectId": "p2",
        "deadline": "2025-01-01T10:00",
        "priority": "high"
    }))
    .unwrap();

    let board = board();
    let task = service()
        .create_task(&form, &board.users, &board.projects, now())
        .unwrap();
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.project_id, "p2");
}
