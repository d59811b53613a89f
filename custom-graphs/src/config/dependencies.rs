//! Dependency initialization and wiring for the custom graphs binary.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use custom_graphs_repository::{PostgresCatalogStore, PostgresGroupResolver};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::catalog_filter::GraphCatalogFilter;
use crate::config::CustomGraphsConfig;
use crate::i18n::Untranslated;
use crate::renderer::{GraphRenderer, HttpRenderBackend};
use crate::CustomGraphsError;

/// Default rendering backend URL.
const DEFAULT_RENDER_BACKEND_URL: &str = "http://localhost:8090";

/// Default maximum number of pooled database connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default rendering backend request timeout in seconds.
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct DependencySettings {
    pub database_url: String,
    pub max_connections: u32,
    pub render_backend_url: String,
    pub render_timeout: Duration,
    pub config: CustomGraphsConfig,
}

impl DependencySettings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
    /// - `RENDER_BACKEND_URL`: Combined-series rendering service (default: http://localhost:8090)
    /// - `RENDER_BACKEND_TIMEOUT_SECS`: Rendering request timeout (default: 30)
    /// - `BATCH_SOURCE_COUNTS`: "true" to count sources with one query (default: false)
    pub fn from_env() -> Result<Self, CustomGraphsError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| CustomGraphsError::config("DATABASE_URL must be set"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let render_backend_url = env::var("RENDER_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_RENDER_BACKEND_URL.to_string());
        let render_timeout = env::var("RENDER_BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RENDER_TIMEOUT_SECS);
        let batch_source_counts = match env::var("BATCH_SOURCE_COUNTS") {
            Ok(value) => parse_bool(&value).unwrap_or_else(|| {
                warn!(value = %value, "Invalid BATCH_SOURCE_COUNTS, defaulting to false");
                false
            }),
            Err(_) => false,
        };

        Ok(Self {
            database_url,
            max_connections,
            render_backend_url,
            render_timeout: Duration::from_secs(render_timeout),
            config: CustomGraphsConfig {
                batch_source_counts,
                ..CustomGraphsConfig::default()
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub filter: GraphCatalogFilter,
    pub renderer: GraphRenderer,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Filter and renderer sharing one connection pool
    /// * `Err(CustomGraphsError)` - If settings are missing or a client cannot be built
    pub async fn from_env() -> Result<Self, CustomGraphsError> {
        Self::new(DependencySettings::from_env()?).await
    }

    /// Initialize all dependencies from explicit settings.
    pub async fn new(settings: DependencySettings) -> Result<Self, CustomGraphsError> {
        info!(
            max_connections = settings.max_connections,
            render_backend_url = %settings.render_backend_url,
            batch_source_counts = settings.config.batch_source_counts,
            "Initializing dependencies"
        );

        // Lazy: an unreachable database surfaces per query, not at startup.
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_lazy(&settings.database_url)
            .map_err(|e| CustomGraphsError::config(format!("Invalid DATABASE_URL: {}", e)))?;

        let catalog = Arc::new(PostgresCatalogStore::new(pool.clone()));
        let groups = Arc::new(PostgresGroupResolver::new(pool));
        let backend = HttpRenderBackend::new(&settings.render_backend_url, settings.render_timeout)
            .map_err(|e| {
                CustomGraphsError::config(format!("Failed to create render backend: {}", e))
            })?;
        let translator = Arc::new(Untranslated);

        let filter = GraphCatalogFilter::with_config(
            catalog.clone(),
            groups,
            settings.config.clone(),
        );
        let renderer = GraphRenderer::with_config(
            catalog,
            Arc::new(backend),
            translator,
            settings.config,
        );

        Ok(Self { filter, renderer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
