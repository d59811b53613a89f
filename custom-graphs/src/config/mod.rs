//! Configuration types and dependency wiring for the custom graphs core.

mod dependencies;

pub use dependencies::{Dependencies, DependencySettings};

/// Configuration for the catalog filter and the graph renderer.
///
/// Passed explicitly to both components; nothing is read from global state.
#[derive(Debug, Clone)]
pub struct CustomGraphsConfig {
    /// Count the sources of all visible graphs with one batched catalog query
    /// instead of one query per graph. The result is identical either way.
    ///
    /// Defaults to `false`.
    pub batch_source_counts: bool,

    /// Untranslated text of the placeholder shown for graphs without sources.
    ///
    /// Defaults to "Empty graph".
    pub empty_graph_text: String,
}

impl Default for CustomGraphsConfig {
    fn default() -> Self {
        Self {
            batch_source_counts: false,
            empty_graph_text: "Empty graph".to_string(),
        }
    }
}

impl CustomGraphsConfig {
    /// Create a config that counts sources with a single batched query.
    ///
    /// # Returns
    ///
    /// A `CustomGraphsConfig` with `batch_source_counts` enabled.
    pub fn batched() -> Self {
        Self {
            batch_source_counts: true,
            ..Self::default()
        }
    }
}
