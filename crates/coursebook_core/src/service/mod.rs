//! Use-case services over the domain model.
//!
//! # Responsibility
//! - Own entities and orchestrate bulk operations (`registry`).
//! - Translate collaborator text commands into registry calls (`command`).

pub mod command;
pub mod registry;
