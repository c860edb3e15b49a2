//! Inbox notification model.
//!
//! # Invariants
//! - `read` only transitions `false -> true`.
//! - Records are replaced, never edited in place, by the inbox reducer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a notification.
pub type NotificationId = String;

/// Notification category, used for icon selection by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Deadline,
    Assignment,
    Mention,
    Update,
}

impl NotificationKind {
    pub const ALL: [Self; 4] = [
        Self::Deadline,
        Self::Assignment,
        Self::Mention,
        Self::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::Assignment => "assignment",
            Self::Mention => "mention",
            Self::Update => "update",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "deadline" => Some(Self::Deadline),
            "assignment" => Some(Self::Assignment),
            "mention" => Some(Self::Mention),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

/// Inbox entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Serialized as `type` to match the dataset schema.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Returns a copy of this entry in the read state.
    pub fn as_read(&self) -> Self {
        Self {
            read: true,
            ..self.clone()
        }
    }
}
