//! Domain model for the project/task dashboard.
//!
//! # Responsibility
//! - Define closed entity types consumed by metrics, search and validation.
//! - Keep the JSON shape aligned with the dashboard dataset (camelCase
//!   fields, snake_case enum values).
//!
//! # Invariants
//! - Every entity is identified by an opaque, stable string id.
//! - Enum fields are closed sets; unknown values are rejected on decode.
//! - Derived state (overdue, progress) is never stored.

pub mod notification;
pub mod project;
pub mod task;
pub mod user;
