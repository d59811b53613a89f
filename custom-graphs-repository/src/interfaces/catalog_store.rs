//! This module defines the `CatalogStore` trait, which provides read access to
//! custom graph definitions and their weighted sources.
use std::collections::HashMap;

use custom_graphs_shared::{GraphDefinition, GraphId, GraphSource};

use crate::errors::CatalogError;

/// A trait that defines the interface for reading the custom graph catalog.
///
/// Implementors return an empty collection when there is nothing to read and
/// reserve `CatalogError::Unavailable` for a store that cannot answer at all.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists every graph definition, ordered by name.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<GraphDefinition>)` - All definitions, possibly empty
    /// * `Err(CatalogError)` - If the catalog cannot be read
    async fn list_all_graphs(&self) -> Result<Vec<GraphDefinition>, CatalogError>;

    /// Fetches a single graph definition.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(GraphDefinition))` - The definition
    /// * `Ok(None)` - No graph with this id
    /// * `Err(CatalogError)` - If the catalog cannot be read
    async fn get_graph(&self, graph_id: GraphId) -> Result<Option<GraphDefinition>, CatalogError>;

    /// Lists the sources of a graph in their stored order.
    ///
    /// The order is significant: callers pair the i-th module id with the i-th weight.
    async fn list_sources(&self, graph_id: GraphId) -> Result<Vec<GraphSource>, CatalogError>;

    /// Counts the sources attached to a graph.
    async fn count_sources(&self, graph_id: GraphId) -> Result<u64, CatalogError>;

    /// Counts the sources of several graphs at once.
    ///
    /// Every requested id is present in the returned map, with `0` for graphs
    /// without sources. The default implementation issues one `count_sources`
    /// call per id; stores that can answer in a single query should override it.
    async fn count_sources_batch(
        &self,
        graph_ids: &[GraphId],
    ) -> Result<HashMap<GraphId, u64>, CatalogError> {
        let mut counts = HashMap::with_capacity(graph_ids.len());
        for &graph_id in graph_ids {
            counts.insert(graph_id, self.count_sources(graph_id).await?);
        }
        Ok(counts)
    }
}
