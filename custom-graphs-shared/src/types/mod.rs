//! Core data structures for custom graph catalogs.
//! Re-exports identifiers, graph records and group membership types.

pub mod graph;
pub mod group;
pub mod ids;

pub use graph::{GraphDefinition, GraphSource};
pub use group::{AccessibleGroups, GroupMembership};
pub use ids::{GraphId, GroupId, ModuleId, UserId, ALL_GROUP_ID};
