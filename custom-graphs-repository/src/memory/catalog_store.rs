use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use custom_graphs_shared::{GraphDefinition, GraphId, GraphSource};

use crate::{CatalogError, CatalogStore};

/// Catalog store backed by in-process vectors.
///
/// Sources keep the order in which they were added, like rows ordered by id.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    graphs: RwLock<Vec<GraphDefinition>>,
    sources: RwLock<Vec<GraphSource>>,
    unavailable: AtomicBool,
    count_queries: AtomicUsize,
    batch_count_queries: AtomicUsize,
}

impl InMemoryCatalogStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with graphs and sources.
    pub fn with_data(graphs: Vec<GraphDefinition>, sources: Vec<GraphSource>) -> Self {
        Self {
            graphs: RwLock::new(graphs),
            sources: RwLock::new(sources),
            ..Self::default()
        }
    }

    /// Add a graph definition, replacing any existing one with the same id.
    pub fn add_graph(&self, graph: GraphDefinition) {
        let mut graphs = self.graphs.write().unwrap_or_else(PoisonError::into_inner);
        graphs.retain(|existing| existing.id != graph.id);
        graphs.push(graph);
    }

    /// Append a source to its graph.
    pub fn add_source(&self, source: GraphSource) {
        self.sources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source);
    }

    /// Make every subsequent call answer `CatalogError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of single-graph count queries answered so far.
    pub fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }

    /// Number of batched count queries answered so far.
    pub fn batch_count_queries(&self) -> usize {
        self.batch_count_queries.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> Result<(), CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::unavailable("in-memory catalog marked unavailable"));
        }
        Ok(())
    }

    fn sources_of(&self, graph_id: GraphId) -> Vec<GraphSource> {
        self.sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|source| source.graph_id == graph_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_all_graphs(&self) -> Result<Vec<GraphDefinition>, CatalogError> {
        self.ensure_available()?;
        let mut graphs = self
            .graphs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        graphs.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(graphs)
    }

    async fn get_graph(&self, graph_id: GraphId) -> Result<Option<GraphDefinition>, CatalogError> {
        self.ensure_available()?;
        Ok(self
            .graphs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|graph| graph.id == graph_id)
            .cloned())
    }

    async fn list_sources(&self, graph_id: GraphId) -> Result<Vec<GraphSource>, CatalogError> {
        self.ensure_available()?;
        Ok(self.sources_of(graph_id))
    }

    async fn count_sources(&self, graph_id: GraphId) -> Result<u64, CatalogError> {
        self.ensure_available()?;
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.sources_of(graph_id).len() as u64)
    }

    async fn count_sources_batch(
        &self,
        graph_ids: &[GraphId],
    ) -> Result<HashMap<GraphId, u64>, CatalogError> {
        self.ensure_available()?;
        self.batch_count_queries.fetch_add(1, Ordering::SeqCst);
        Ok(graph_ids
            .iter()
            .map(|&graph_id| (graph_id, self.sources_of(graph_id).len() as u64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custom_graphs_shared::UserId;

    fn graph(id: GraphId, name: &str) -> GraphDefinition {
        GraphDefinition::new(id, name, UserId::from("admin"), 0)
    }

    #[tokio::test]
    async fn test_list_all_graphs_ordered_by_name() {
        let store = InMemoryCatalogStore::with_data(
            vec![graph(1, "Memory"), graph(2, "CPU"), graph(3, "Disk")],
            vec![],
        );

        let names: Vec<String> = store
            .list_all_graphs()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["CPU", "Disk", "Memory"]);
    }

    #[tokio::test]
    async fn test_sources_keep_insertion_order() {
        let store = InMemoryCatalogStore::new();
        store.add_source(GraphSource::new(1, 30, 0.5));
        store.add_source(GraphSource::new(2, 99, 1.0));
        store.add_source(GraphSource::new(1, 10, 2.0));

        let sources = store.list_sources(1).await.unwrap();
        assert_eq!(
            sources.iter().map(|s| s.module_id).collect::<Vec<_>>(),
            vec![30, 10]
        );
        assert_eq!(store.count_sources(1).await.unwrap(), 2);
        assert_eq!(store.count_sources(7).await.unwrap(), 0);
        assert_eq!(store.count_queries(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_is_distinct_from_empty() {
        let store = InMemoryCatalogStore::new();
        assert!(store.list_all_graphs().await.unwrap().is_empty());

        store.set_unavailable(true);
        let err = store.list_all_graphs().await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_add_graph_replaces_same_id() {
        let store = InMemoryCatalogStore::new();
        store.add_graph(graph(1, "Old"));
        store.add_graph(graph(1, "New"));

        let graphs = store.list_all_graphs().await.unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(store.get_graph(1).await.unwrap().unwrap().name, "New");
        assert!(store.get_graph(2).await.unwrap().is_none());
    }
}
