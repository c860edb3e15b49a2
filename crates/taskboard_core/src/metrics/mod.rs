//! Derived metrics over task collections.
//!
//! # Responsibility
//! - Compute read-only aggregates for dashboard cards and charts.
//! - Keep every computation pure and deterministic.
//!
//! # Invariants
//! - No function reads the wall clock; `now` is always a parameter.

pub mod dashboard;
pub mod task_metrics;
