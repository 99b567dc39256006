//! Domain model for people, capabilities, and courses.
//!
//! # Responsibility
//! - Define the canonical entities used by registry orchestration.
//! - Keep pay/average rules next to the data they read.
//!
//! # Invariants
//! - Every person and course is identified by a stable UUID.
//! - Courses reference people by ID; the registry owns every entity.

pub mod capability;
pub mod course;
pub mod money;
pub mod person;
