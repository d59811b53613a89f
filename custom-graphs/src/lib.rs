//! # Custom Graphs
//!
//! Permission-filtered listing and rendering of custom graphs: saved, named
//! combinations of weighted module time series.
//!
//! ## Architecture
//!
//! Two stateless components share the graph catalog:
//!
//! 1. **Catalog filter**: lists the graphs a user may see
//! 2. **Renderer**: combines a graph's weighted series through a rendering backend
//!
//! ## Modules
//!
//! - [`catalog_filter`]: Visibility rules and listing
//! - [`renderer`]: Graph rendering and the backend seam
//! - [`periods`]: Standard lookback periods
//! - [`i18n`]: Localisation seam for user-facing text
//! - [`config`]: Configuration and dependency initialization
//! - [`errors`]: Error types

pub mod catalog_filter;
pub mod config;
pub mod errors;
pub mod i18n;
pub mod periods;
pub mod renderer;

pub use catalog_filter::{GraphCatalogFilter, GraphSummary, VisibleGraphs, VisibleGraphsQuery};
pub use config::{CustomGraphsConfig, Dependencies};
pub use errors::CustomGraphsError;
pub use periods::{list_standard_periods, StandardPeriod};
pub use renderer::{GraphOutput, GraphRenderer, RenderBackend, RenderRequest};
