//! Resolution of the custom graphs a user is allowed to see.
//!
//! A graph is visible to a user when, checked in this order:
//!
//! 1. its group is in the user's accessible-group set (ownership does not bypass this),
//! 2. it is not private, or the user owns it,
//! 3. for a real group (id > 0), the accessible-group set lists that group explicitly.
//!
//! Graphs in the "All" pseudo-group (id 0) skip the third check but still need
//! the first one.

use std::collections::HashMap;
use std::sync::Arc;

use custom_graphs_repository::{CatalogStore, GroupResolver, RequiredPrivileges};
use custom_graphs_shared::{AccessibleGroups, GraphDefinition, GraphId, UserId, ALL_GROUP_ID};
use futures::future::try_join_all;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CustomGraphsConfig;
use crate::errors::Result;

/// Parameters of a visible-graph listing.
#[derive(Debug, Clone)]
pub struct VisibleGraphsQuery {
    /// The requesting user. Session defaults are resolved by the caller.
    pub user_id: UserId,
    /// Return only `{id → name}` instead of annotated definitions.
    pub names_only: bool,
    /// Whether the "All" pseudo-group counts as accessible.
    pub include_all_group: bool,
    /// Privileges the user must hold in a group for it to be accessible.
    pub privileges: RequiredPrivileges,
}

impl VisibleGraphsQuery {
    /// Full listing with the "All" group included and the default `IR` privilege.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            names_only: false,
            include_all_group: true,
            privileges: RequiredPrivileges::default(),
        }
    }

    pub fn names_only(mut self, names_only: bool) -> Self {
        self.names_only = names_only;
        self
    }

    pub fn include_all_group(mut self, include_all_group: bool) -> Self {
        self.include_all_group = include_all_group;
        self
    }

    pub fn privileges(mut self, privileges: RequiredPrivileges) -> Self {
        self.privileges = privileges;
        self
    }
}

/// A visible graph definition annotated with the number of its sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    #[serde(flatten)]
    pub definition: GraphDefinition,
    pub source_count: u64,
}

/// The graphs a user may see, keyed by graph id in catalog (name) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VisibleGraphs {
    Names(IndexMap<GraphId, String>),
    Full(IndexMap<GraphId, GraphSummary>),
}

impl VisibleGraphs {
    fn empty(names_only: bool) -> Self {
        if names_only {
            Self::Names(IndexMap::new())
        } else {
            Self::Full(IndexMap::new())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Names(names) => names.len(),
            Self::Full(graphs) => graphs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible graph ids in listing order.
    pub fn ids(&self) -> Vec<GraphId> {
        match self {
            Self::Names(names) => names.keys().copied().collect(),
            Self::Full(graphs) => graphs.keys().copied().collect(),
        }
    }

    /// Display name of a visible graph.
    pub fn name(&self, graph_id: GraphId) -> Option<&str> {
        match self {
            Self::Names(names) => names.get(&graph_id).map(String::as_str),
            Self::Full(graphs) => graphs.get(&graph_id).map(|g| g.definition.name.as_str()),
        }
    }
}

/// Whether `graph` is visible to `user_id` given the user's accessible groups.
pub fn is_visible(graph: &GraphDefinition, user_id: &UserId, groups: &AccessibleGroups) -> bool {
    if !groups.contains(graph.group_id) {
        return false;
    }

    if graph.is_private && !graph.is_owned_by(user_id) {
        return false;
    }

    if graph.group_id > ALL_GROUP_ID && groups.get(graph.group_id).is_none() {
        return false;
    }

    true
}

/// Lists the custom graphs a user may see.
///
/// Stateless over its collaborators: every call resolves groups and reads the
/// catalog afresh.
pub struct GraphCatalogFilter {
    catalog: Arc<dyn CatalogStore>,
    groups: Arc<dyn GroupResolver>,
    config: CustomGraphsConfig,
}

impl GraphCatalogFilter {
    /// Create a filter with default configuration.
    pub fn new(catalog: Arc<dyn CatalogStore>, groups: Arc<dyn GroupResolver>) -> Self {
        Self::with_config(catalog, groups, CustomGraphsConfig::default())
    }

    /// Create a filter with custom configuration.
    pub fn with_config(
        catalog: Arc<dyn CatalogStore>,
        groups: Arc<dyn GroupResolver>,
        config: CustomGraphsConfig,
    ) -> Self {
        Self {
            catalog,
            groups,
            config,
        }
    }

    /// List the graphs visible to the query's user.
    ///
    /// # Returns
    ///
    /// * `Ok(VisibleGraphs::Names)` - In names-only mode
    /// * `Ok(VisibleGraphs::Full)` - Definitions with their source counts otherwise
    /// * `Err(CustomGraphsError::Groups)` - If the user's groups cannot be resolved
    /// * `Err(CustomGraphsError::Catalog)` - If counting sources fails
    ///
    /// A catalog that cannot be listed yields an empty result, not an error.
    pub async fn list_visible_graphs(&self, query: &VisibleGraphsQuery) -> Result<VisibleGraphs> {
        let groups = self
            .groups
            .resolve_accessible_groups(&query.user_id, &query.privileges, query.include_all_group)
            .await?;

        let all_graphs = match self.catalog.list_all_graphs().await {
            Ok(graphs) => graphs,
            Err(e) => {
                warn!(
                    user_id = %query.user_id,
                    error = %e,
                    "Graph catalog unavailable, listing no graphs"
                );
                return Ok(VisibleGraphs::empty(query.names_only));
            }
        };

        let catalog_size = all_graphs.len();
        let visible: Vec<GraphDefinition> = all_graphs
            .into_iter()
            .filter(|graph| is_visible(graph, &query.user_id, &groups))
            .collect();

        debug!(
            user_id = %query.user_id,
            accessible_groups = groups.len(),
            catalog_size,
            visible = visible.len(),
            "Filtered graph catalog"
        );

        if query.names_only {
            return Ok(VisibleGraphs::Names(
                visible.into_iter().map(|graph| (graph.id, graph.name)).collect(),
            ));
        }

        let ids: Vec<GraphId> = visible.iter().map(|graph| graph.id).collect();
        let counts = self.source_counts(&ids).await?;

        Ok(VisibleGraphs::Full(
            visible
                .into_iter()
                .map(|definition| {
                    let source_count = counts.get(&definition.id).copied().unwrap_or(0);
                    (
                        definition.id,
                        GraphSummary {
                            definition,
                            source_count,
                        },
                    )
                })
                .collect(),
        ))
    }

    /// `{id → name}` of the graphs visible to `user_id`, with default flags.
    pub async fn list_visible_graph_names(
        &self,
        user_id: &UserId,
    ) -> Result<IndexMap<GraphId, String>> {
        let query = VisibleGraphsQuery::new(user_id.clone()).names_only(true);
        match self.list_visible_graphs(&query).await? {
            VisibleGraphs::Names(names) => Ok(names),
            VisibleGraphs::Full(graphs) => Ok(graphs
                .into_iter()
                .map(|(id, summary)| (id, summary.definition.name))
                .collect()),
        }
    }

    /// Annotated definitions of the graphs visible to `user_id`, with default flags.
    pub async fn list_visible_graph_summaries(
        &self,
        user_id: &UserId,
    ) -> Result<IndexMap<GraphId, GraphSummary>> {
        let query = VisibleGraphsQuery::new(user_id.clone());
        match self.list_visible_graphs(&query).await? {
            VisibleGraphs::Full(graphs) => Ok(graphs),
            VisibleGraphs::Names(_) => Ok(IndexMap::new()),
        }
    }

    async fn source_counts(&self, ids: &[GraphId]) -> Result<HashMap<GraphId, u64>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        if self.config.batch_source_counts {
            return Ok(self.catalog.count_sources_batch(ids).await?);
        }

        let counts = try_join_all(ids.iter().map(|&graph_id| async move {
            self.catalog
                .count_sources(graph_id)
                .await
                .map(|count| (graph_id, count))
        }))
        .await?;

        Ok(counts.into_iter().collect())
    }
}
