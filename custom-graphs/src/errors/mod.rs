//! Error types for the custom graphs core.

use custom_graphs_repository::{CatalogError, GroupResolverError};
use custom_graphs_shared::GraphId;
use thiserror::Error;

use crate::renderer::RenderBackendError;

/// Errors surfaced by the catalog filter and the graph renderer.
///
/// Absence (no visible graphs, a graph without sources) is never an error.
/// Collaborator failures are wrapped unchanged.
#[derive(Error, Debug)]
pub enum CustomGraphsError {
    /// Catalog store failure outside of the catalog listing.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Group resolution failure, including invalid privileges.
    #[error("Group resolution error: {0}")]
    Groups(#[from] GroupResolverError),

    /// Rendering backend failure.
    #[error("Render error: {0}")]
    Render(#[from] RenderBackendError),

    /// The request was rejected before reaching any collaborator.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The graph definition does not exist.
    #[error("Graph {0} not found")]
    GraphNotFound(GraphId),

    /// Failed to write the rendered output.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CustomGraphsError {
    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CustomGraphsError>;
