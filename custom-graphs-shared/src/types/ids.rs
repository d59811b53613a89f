//! Identifier types for catalog records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a custom graph definition.
pub type GraphId = i64;

/// Identifier of a visibility group.
pub type GroupId = i64;

/// Identifier of a monitored module whose time series feeds a graph.
pub type ModuleId = i64;

/// The "All" pseudo-group. Graphs scoped to it are visible across every group
/// the requester can access.
pub const ALL_GROUP_ID: GroupId = 0;

/// Identifier of a console user (e.g. `"admin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
