//! This module defines and re-exports the interfaces for the custom graphs repository.
//! It serves as a central point for accessing traits related to data interaction.
mod catalog_store;
mod group_resolver;

pub use catalog_store::CatalogStore;
pub use group_resolver::GroupResolver;
