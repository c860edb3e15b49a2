//! Project model.
//!
//! # Invariants
//! - A project does not own tasks; tasks point back via `Task::project_id`.
//! - `status` is a closed set.

use crate::model::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a project.
pub type ProjectId = String;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Completed, Self::OnHold];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
        }
    }

    /// Parses the stable wire value. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "on_hold" => Some(Self::OnHold),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

/// Project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Ordered member list as shown on the project card.
    #[serde(default)]
    pub members: Vec<User>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
