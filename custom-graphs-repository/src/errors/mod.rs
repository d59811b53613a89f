//! Error types for the custom graphs repository.
//! Consolidates and re-exports the catalog and group resolver errors.
mod catalog;
mod group_resolver;

pub use catalog::CatalogError;
pub use group_resolver::GroupResolverError;
