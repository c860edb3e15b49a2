//! Notification inbox reducer.
//!
//! # Responsibility
//! - Apply read-state transitions to the full notification collection.
//! - Derive unread counts and relative age labels.
//!
//! # Invariants
//! - Reducers return a new collection; input records are never edited.
//! - Read is absorbing: no transition returns an entry to unread.
//! - Unknown ids are a no-op, not an error.
//! - Collection order is preserved.

use crate::model::notification::{Notification, NotificationId};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use std::fmt::{Display, Formatter};

/// Read-state transition requested by the inbox view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxAction {
    /// Mark one entry as read.
    MarkRead(NotificationId),
    /// Mark every entry as read.
    MarkAllRead,
}

/// Applies one action and returns the next collection.
pub fn reduce(notifications: &[Notification], action: &InboxAction) -> Vec<Notification> {
    match action {
        InboxAction::MarkRead(id) => mark_read(notifications, id),
        InboxAction::MarkAllRead => mark_all_read(notifications),
    }
}

/// Marks the entry with `id` as read.
///
/// Returns an equivalent collection when no entry matches.
pub fn mark_read(notifications: &[Notification], id: &str) -> Vec<Notification> {
    let mut matched = false;
    let next: Vec<Notification> = notifications
        .iter()
        .map(|notification| {
            if notification.id == id {
                matched = true;
                notification.as_read()
            } else {
                notification.clone()
            }
        })
        .collect();

    if !matched {
        debug!("event=inbox_mark_read module=inbox status=noop reason=unknown_id");
    }
    next
}

pub fn mark_all_read(notifications: &[Notification]) -> Vec<Notification> {
    notifications.iter().map(Notification::as_read).collect()
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|notification| !notification.read)
        .count()
}

/// Coarse age of a notification relative to a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    /// Less than one hour old, or timestamped in the future.
    JustNow,
    /// Whole hours, in `1..24`.
    HoursAgo(i64),
    /// One day or older; rendered as the calendar date (UTC).
    On(NaiveDate),
}

impl Display for RelativeAge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JustNow => write!(f, "Just now"),
            Self::HoursAgo(hours) => write!(f, "{hours}h ago"),
            Self::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Buckets `created_at` relative to `now`.
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> RelativeAge {
    let hours = (now - created_at).num_hours();
    if hours < 1 {
        RelativeAge::JustNow
    } else if hours < 24 {
        RelativeAge::HoursAgo(hours)
    } else {
        RelativeAge::On(created_at.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::{relative_age, RelativeAge};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn relative_age_buckets_by_hours() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_age(now - Duration::minutes(59), now), RelativeAge::JustNow);
        assert_eq!(relative_age(now - Duration::hours(3), now), RelativeAge::HoursAgo(3));
        assert_eq!(
            relative_age(now - Duration::hours(23) - Duration::minutes(59), now),
            RelativeAge::HoursAgo(23)
        );
        assert_eq!(
            relative_age(now - Duration::hours(24), now),
            RelativeAge::On(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap())
        );
    }

    #[test]
    fn future_timestamps_are_just_now() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_age(now + Duration::hours(5), now), RelativeAge::JustNow);
    }

    #[test]
    fn relative_age_renders_labels() {
        assert_eq!(RelativeAge::JustNow.to_string(), "Just now");
        assert_eq!(RelativeAge::HoursAgo(5).to_string(), "5h ago");
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(RelativeAge::On(date).to_string(), "2025-01-02");
    }
}
