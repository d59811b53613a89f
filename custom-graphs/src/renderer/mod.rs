//! Rendering of a custom graph from its weighted sources.
//!
//! The renderer loads a graph's sources in stored order, splits them into
//! parallel module-id and weight lists and hands them to a [`RenderBackend`].
//! A graph without sources renders as a fixed placeholder notice and never
//! reaches the backend.

mod backend;
mod http;

pub use backend::{CombinedSeriesRequest, RenderBackend, RenderBackendError, RenderedArtifact};
pub use http::HttpRenderBackend;

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use custom_graphs_repository::CatalogStore;
use custom_graphs_shared::{GraphDefinition, GraphId, GraphSource};
use tracing::{debug, info};

use crate::config::CustomGraphsConfig;
use crate::errors::{CustomGraphsError, Result};
use crate::i18n::{Translate, Untranslated};

/// Parameters for rendering one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub graph_id: GraphId,
    pub height: u32,
    pub width: u32,
    /// Lookback window in seconds.
    pub period_seconds: i64,
    pub stacked: bool,
    /// End of the window; `None` means now.
    pub start_date: Option<DateTime<Utc>>,
}

impl RenderRequest {
    /// Request using the presentation defaults stored with a definition.
    pub fn from_definition(definition: &GraphDefinition) -> Self {
        Self {
            graph_id: definition.id,
            height: definition.height,
            width: definition.width,
            period_seconds: definition.period_seconds,
            stacked: definition.stacked,
            start_date: None,
        }
    }

    pub fn starting_at(mut self, start_date: Option<DateTime<Utc>>) -> Self {
        self.start_date = start_date;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(CustomGraphsError::invalid_request(format!(
                "graph dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn combined_series(&self, sources: &[GraphSource]) -> CombinedSeriesRequest {
        let (module_ids, weights) = sources
            .iter()
            .map(|source| (source.module_id, source.weight))
            .unzip();

        CombinedSeriesRequest {
            module_ids,
            weights,
            period_seconds: self.period_seconds,
            width: self.width,
            height: self.height,
            title: String::new(),
            y_label: String::new(),
            baseline: 0,
            show_labels: 0,
            only_average: 0,
            stacked: self.stacked,
            start_date: self.start_date.map_or(0, |date| date.timestamp()),
        }
    }
}

/// Outcome of rendering a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOutput {
    /// The graph has no sources; `notice` is the placeholder markup.
    Empty { notice: String },
    Rendered(RenderedArtifact),
}

impl GraphOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// The bytes to emit for this output.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty { notice } => notice.as_bytes(),
            Self::Rendered(artifact) => &artifact.body,
        }
    }
}

/// Renders custom graphs through a combined-series backend.
pub struct GraphRenderer {
    catalog: Arc<dyn CatalogStore>,
    backend: Arc<dyn RenderBackend>,
    translator: Arc<dyn Translate>,
    config: CustomGraphsConfig,
}

impl GraphRenderer {
    /// Create a renderer with untranslated text and default configuration.
    pub fn new(catalog: Arc<dyn CatalogStore>, backend: Arc<dyn RenderBackend>) -> Self {
        Self::with_config(
            catalog,
            backend,
            Arc::new(Untranslated),
            CustomGraphsConfig::default(),
        )
    }

    /// Create a renderer with a translator and custom configuration.
    pub fn with_config(
        catalog: Arc<dyn CatalogStore>,
        backend: Arc<dyn RenderBackend>,
        translator: Arc<dyn Translate>,
        config: CustomGraphsConfig,
    ) -> Self {
        Self {
            catalog,
            backend,
            translator,
            config,
        }
    }

    /// Placeholder markup shown for a graph without sources.
    pub fn empty_notice(&self) -> String {
        format!(
            "<div class='nf'>{}</div>",
            self.translator.translate(&self.config.empty_graph_text)
        )
    }

    /// Render a graph and return the result.
    ///
    /// # Returns
    ///
    /// * `Ok(GraphOutput::Empty)` - The graph has no sources (the backend is not called)
    /// * `Ok(GraphOutput::Rendered)` - The backend's artifact
    /// * `Err(CustomGraphsError::InvalidRequest)` - A zero width or height
    /// * `Err(CustomGraphsError)` - Catalog or backend failures, unchanged
    ///
    /// The graph's existence is not checked; an unknown id simply has no sources.
    pub async fn render_graph(&self, request: &RenderRequest) -> Result<GraphOutput> {
        request.validate()?;

        let sources = self.catalog.list_sources(request.graph_id).await?;
        if sources.is_empty() {
            debug!(graph_id = request.graph_id, "Graph has no sources");
            return Ok(GraphOutput::Empty {
                notice: self.empty_notice(),
            });
        }

        let combined = request.combined_series(&sources);
        let artifact = self.backend.render_combined(&combined).await?;

        info!(
            graph_id = request.graph_id,
            series = combined.module_ids.len(),
            period_seconds = request.period_seconds,
            stacked = request.stacked,
            bytes = artifact.body.len(),
            "Rendered custom graph"
        );
        Ok(GraphOutput::Rendered(artifact))
    }

    /// Render a graph and write it to `out` instead of returning it.
    pub async fn print_graph<W: Write + Send>(
        &self,
        request: &RenderRequest,
        out: &mut W,
    ) -> Result<()> {
        let output = self.render_graph(request).await?;
        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Render a stored graph with the presentation defaults saved in its definition.
    ///
    /// # Returns
    ///
    /// * `Err(CustomGraphsError::GraphNotFound)` - No definition with this id
    pub async fn render_stored(
        &self,
        graph_id: GraphId,
        start_date: Option<DateTime<Utc>>,
    ) -> Result<GraphOutput> {
        let definition = self
            .catalog
            .get_graph(graph_id)
            .await?
            .ok_or(CustomGraphsError::GraphNotFound(graph_id))?;

        let request = RenderRequest::from_definition(&definition).starting_at(start_date);
        self.render_graph(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::CatalogTranslations;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use custom_graphs_repository::InMemoryCatalogStore;
    use custom_graphs_shared::UserId;
    use tokio::sync::Mutex;

    /// Mock backend for testing
    struct MockBackend {
        requests: Mutex<Vec<CombinedSeriesRequest>>,
        should_fail: bool,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl RenderBackend for MockBackend {
        async fn render_combined(
            &self,
            request: &CombinedSeriesRequest,
        ) -> std::result::Result<RenderedArtifact, RenderBackendError> {
            self.requests.lock().await.push(request.clone());
            if self.should_fail {
                return Err(RenderBackendError::backend("Mock failure"));
            }
            Ok(RenderedArtifact::new(
                "text/html",
                format!("<img data-series='{}'>", request.module_ids.len()),
            ))
        }
    }

    fn store() -> Arc<InMemoryCatalogStore> {
        let store = InMemoryCatalogStore::new();
        let mut stored = GraphDefinition::new(1, "Web latency", UserId::from("alice"), 2);
        stored.width = 640;
        stored.height = 320;
        stored.period_seconds = 3_600;
        stored.stacked = true;
        store.add_graph(stored);
        store.add_graph(GraphDefinition::new(2, "Empty", UserId::from("alice"), 2));
        store.add_source(GraphSource::new(1, 30, 0.5));
        store.add_source(GraphSource::new(1, 10, 2.0));
        store.add_source(GraphSource::new(1, 30, 1.0));
        Arc::new(store)
    }

    fn request(graph_id: GraphId) -> RenderRequest {
        RenderRequest {
            graph_id,
            height: 200,
            width: 500,
            period_seconds: 86_400,
            stacked: false,
            start_date: None,
        }
    }

    #[tokio::test]
    async fn test_sources_passed_in_stored_order() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());

        let output = renderer.render_graph(&request(1)).await.unwrap();

        assert!(!output.is_empty());
        let requests = backend.requests.lock().await;
        assert_eq!(requests.len(), 1);
        // Duplicates are kept and weights are not normalised
        assert_eq!(requests[0].module_ids, vec![30, 10, 30]);
        assert_eq!(requests[0].weights, vec![0.5, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_legacy_parameters_are_empty() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());

        renderer.render_graph(&request(1)).await.unwrap();

        let requests = backend.requests.lock().await;
        let sent = &requests[0];
        assert_eq!(sent.title, "");
        assert_eq!(sent.y_label, "");
        assert_eq!((sent.baseline, sent.show_labels, sent.only_average), (0, 0, 0));
        assert_eq!((sent.width, sent.height), (500, 200));
        assert_eq!(sent.period_seconds, 86_400);
        assert_eq!(sent.start_date, 0);
        assert!(!sent.stacked);
    }

    #[tokio::test]
    async fn test_start_date_sent_as_timestamp() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let mut req = request(1).starting_at(Some(date));
        req.stacked = true;
        renderer.render_graph(&req).await.unwrap();

        let requests = backend.requests.lock().await;
        assert_eq!(requests[0].start_date, date.timestamp());
        assert!(requests[0].stacked);
    }

    #[tokio::test]
    async fn test_graph_without_sources_renders_placeholder() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());

        let output = renderer.render_graph(&request(2)).await.unwrap();

        assert_eq!(
            output,
            GraphOutput::Empty {
                notice: "<div class='nf'>Empty graph</div>".to_string()
            }
        );
        assert!(backend.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_graph_renders_placeholder() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());

        let output = renderer.render_graph(&request(404)).await.unwrap();

        assert!(output.is_empty());
        assert!(backend.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_placeholder_is_translated() {
        let translations = CatalogTranslations::new().with_entry("Empty graph", "Gráfica vacía");
        let renderer = GraphRenderer::with_config(
            store(),
            Arc::new(MockBackend::new()),
            Arc::new(translations),
            CustomGraphsConfig::default(),
        );

        let output = renderer.render_graph(&request(2)).await.unwrap();
        assert_eq!(output.as_bytes(), "<div class='nf'>Gráfica vacía</div>".as_bytes());
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let renderer = GraphRenderer::new(store(), Arc::new(MockBackend::failing()));

        let result = renderer.render_graph(&request(1)).await;
        assert!(matches!(result, Err(CustomGraphsError::Render(_))));
    }

    #[tokio::test]
    async fn test_catalog_errors_propagate() {
        let catalog = store();
        catalog.set_unavailable(true);
        let renderer = GraphRenderer::new(catalog, Arc::new(MockBackend::new()));

        let result = renderer.render_graph(&request(1)).await;
        assert!(matches!(result, Err(CustomGraphsError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_invalid_requests_rejected_before_lookup() {
        let catalog = store();
        catalog.set_unavailable(true);
        let renderer = GraphRenderer::new(catalog, Arc::new(MockBackend::new()));

        let mut zero_width = request(1);
        zero_width.width = 0;
        let mut zero_height = request(1);
        zero_height.height = 0;

        for req in [zero_width, zero_height] {
            let result = renderer.render_graph(&req).await;
            assert!(matches!(result, Err(CustomGraphsError::InvalidRequest(_))));
        }
    }

    #[tokio::test]
    async fn test_period_passed_through_unchecked() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());

        let mut empty = request(2);
        empty.period_seconds = 0;
        let output = renderer.render_graph(&empty).await.unwrap();
        assert!(output.is_empty());

        let mut sourced = request(1);
        sourced.period_seconds = 0;
        renderer.render_graph(&sourced).await.unwrap();

        let requests = backend.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].period_seconds, 0);
    }

    #[tokio::test]
    async fn test_print_graph_writes_output() {
        let renderer = GraphRenderer::new(store(), Arc::new(MockBackend::new()));

        let mut out = Vec::new();
        renderer.print_graph(&request(1), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<img data-series='3'>");

        let mut out = Vec::new();
        renderer.print_graph(&request(2), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<div class='nf'>Empty graph</div>");
    }

    #[tokio::test]
    async fn test_render_stored_uses_definition_defaults() {
        let backend = Arc::new(MockBackend::new());
        let renderer = GraphRenderer::new(store(), backend.clone());

        renderer.render_stored(1, None).await.unwrap();

        let requests = backend.requests.lock().await;
        assert_eq!((requests[0].width, requests[0].height), (640, 320));
        assert_eq!(requests[0].period_seconds, 3_600);
        assert!(requests[0].stacked);
    }

    #[tokio::test]
    async fn test_render_stored_unknown_graph() {
        let renderer = GraphRenderer::new(store(), Arc::new(MockBackend::new()));

        let result = renderer.render_stored(404, None).await;
        assert!(matches!(result, Err(CustomGraphsError::GraphNotFound(404))));
    }
}
