//! HTTP client for a combined-series rendering service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use super::backend::{CombinedSeriesRequest, RenderBackend, RenderBackendError, RenderedArtifact};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Rendering backend that POSTs requests as JSON to `{base_url}/combined`.
///
/// # Example
///
/// ```ignore
/// use custom_graphs::renderer::HttpRenderBackend;
/// use std::time::Duration;
///
/// let backend = HttpRenderBackend::new("http://localhost:8090", Duration::from_secs(30))?;
/// ```
pub struct HttpRenderBackend {
    url: String,
    client: ReqwestClient,
}

impl HttpRenderBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RenderBackendError> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            url: format!("{}/combined", base_url.trim_end_matches('/')),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RenderBackend for HttpRenderBackend {
    async fn render_combined(
        &self,
        request: &CombinedSeriesRequest,
    ) -> Result<RenderedArtifact, RenderBackendError> {
        debug!(
            url = %self.url,
            series = request.module_ids.len(),
            period_seconds = request.period_seconds,
            "Requesting combined graph"
        );

        let res = self.client.post(&self.url).json(request).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(RenderBackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = res.bytes().await?;

        Ok(RenderedArtifact::new(content_type, bytes.to_vec()))
    }
}
