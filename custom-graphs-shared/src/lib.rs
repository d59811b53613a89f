//! # Custom Graphs Shared
//!
//! This crate defines the data structures shared across the custom graphs workspace.
//! It includes graph definitions, their weighted sources and the group memberships
//! used to decide which graphs a user may see.

pub mod types;

pub use types::graph::{GraphDefinition, GraphSource};
pub use types::group::{AccessibleGroups, GroupMembership};
pub use types::ids::{GraphId, GroupId, ModuleId, UserId, ALL_GROUP_ID};
