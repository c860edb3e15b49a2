//! Core use-case services.
//!
//! # Responsibility
//! - Validate creation forms into draft entities.
//! - Apply notification read-state transitions.
//! - Stay independent from how the caller stores entities.

pub mod draft;
pub mod inbox;
