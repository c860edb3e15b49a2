//! Team member model.
//!
//! # Responsibility
//! - Define the identity record referenced by tasks, comments and projects.
//!
//! # Invariants
//! - Users are immutable once created; the entity store owns them.
//! - `role` is a closed set.

use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a user.
pub type UserId = String;

/// Access role shown on team cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    TeamMember,
}

impl UserRole {
    /// Every role in display order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::TeamMember];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::TeamMember => "team_member",
        }
    }

    /// Parses the stable wire value. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "team_member" => Some(Self::TeamMember),
            _ => None,
        }
    }

    /// Human-readable badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::TeamMember => "Team Member",
        }
    }
}

/// Team member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Optional avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Creates a user without an avatar.
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            avatar: None,
        }
    }

    /// First character of every whitespace-separated name part.
    ///
    /// Used as avatar fallback text. Returns an empty string for blank names.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}
