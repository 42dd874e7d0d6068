//! Core domain models for npm-updates
//!
//! This module contains the shared record types:
//! - Outdated dependency records, with and without snapshot ids
//! - Dependency kinds (manifest sections)
//! - The user's id selection for the update phase

mod dependency;
mod kind;
mod selection;

pub use dependency::{IdentifiedDependency, OutdatedDependency};
pub use kind::DependencyKind;
pub use selection::Selection;
