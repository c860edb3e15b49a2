//! Search and filter entry points for list views.
//!
//! # Responsibility
//! - Expose stateless text/category filters over entity slices.
//! - Keep result ordering identical to input ordering.

pub mod filter;
