//! The combined-series rendering backend seam.

use async_trait::async_trait;
use custom_graphs_shared::ModuleId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a combined-series rendering backend.
#[derive(Debug, Error)]
pub enum RenderBackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

impl RenderBackendError {
    /// Create a generic backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Everything a backend needs to draw one combined graph.
///
/// `module_ids[i]` is drawn with `weights[i]`. `title`, `y_label` and the
/// three legacy flags are part of the backend contract but always sent empty
/// or zero by `GraphRenderer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSeriesRequest {
    pub module_ids: Vec<ModuleId>,
    pub weights: Vec<f64>,
    pub period_seconds: i64,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub y_label: String,
    pub baseline: i32,
    pub show_labels: i32,
    pub only_average: i32,
    pub stacked: bool,
    /// Unix timestamp the window ends at; `0` means now.
    pub start_date: i64,
}

/// A rendered graph as produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// MIME type of `body`, e.g. `text/html` or `image/png`.
    pub content_type: String,
    pub body: Vec<u8>,
}

impl RenderedArtifact {
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

/// Turns a weighted list of module series and a time window into a visual artifact.
///
/// Implementations own any reordering, normalisation or deduplication; callers
/// pass the sources exactly as stored.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    async fn render_combined(
        &self,
        request: &CombinedSeriesRequest,
    ) -> Result<RenderedArtifact, RenderBackendError>;
}
