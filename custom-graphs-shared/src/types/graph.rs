//! Graph definition and graph source records.
//!
//! Both records are owned by the catalog store. This workspace only reads them.

use serde::{Deserialize, Serialize};

use super::ids::{GraphId, GroupId, ModuleId, UserId, ALL_GROUP_ID};

/// A saved, named combination of weighted module series.
///
/// # Fields
///
/// - `id`: Unique, immutable identifier
/// - `name`: Display name (the catalog is listed ordered by it)
/// - `owner_user_id`: User who created the graph
/// - `group_id`: Visibility group, `0` being the "All" pseudo-group
/// - `is_private`: When set, only the owner may see the graph
/// - `description`, `period_seconds`, `width`, `height`, `stacked`:
///   presentation defaults stored alongside the definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphDefinition {
    pub id: GraphId,
    pub name: String,
    pub owner_user_id: UserId,
    pub group_id: GroupId,
    pub is_private: bool,
    #[serde(default)]
    pub description: String,
    pub period_seconds: i64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub stacked: bool,
}

impl GraphDefinition {
    /// Default lookback window for a new definition: one day.
    pub const DEFAULT_PERIOD_SECONDS: i64 = 86_400;
    pub const DEFAULT_WIDTH: u32 = 550;
    pub const DEFAULT_HEIGHT: u32 = 210;

    /// Create a public definition with the default presentation settings.
    ///
    /// # Example
    ///
    /// ```
    /// use custom_graphs_shared::{GraphDefinition, UserId};
    ///
    /// let graph = GraphDefinition::new(7, "Web latency", UserId::from("admin"), 2).private();
    /// assert!(graph.is_private);
    /// assert_eq!(graph.group_id, 2);
    /// ```
    pub fn new(
        id: GraphId,
        name: impl Into<String>,
        owner_user_id: UserId,
        group_id: GroupId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner_user_id,
            group_id,
            is_private: false,
            description: String::new(),
            period_seconds: Self::DEFAULT_PERIOD_SECONDS,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            stacked: false,
        }
    }

    /// Mark the definition as private to its owner.
    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Whether the graph is scoped to the "All" pseudo-group.
    pub fn is_in_all_group(&self) -> bool {
        self.group_id == ALL_GROUP_ID
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_user_id == user_id
    }
}

/// One weighted series reference belonging to a graph definition.
///
/// The stored order of a graph's sources is significant: the i-th module id
/// is rendered with the i-th weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphSource {
    pub graph_id: GraphId,
    pub module_id: ModuleId,
    pub weight: f64,
}

impl GraphSource {
    pub fn new(graph_id: GraphId, module_id: ModuleId, weight: f64) -> Self {
        Self {
            graph_id,
            module_id,
            weight,
        }
    }
}
