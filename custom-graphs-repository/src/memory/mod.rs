//! In-memory catalog store and group resolver for testing and local development.
//!
//! Both can be pre-populated and need no database. The catalog store counts
//! the queries it answers so callers can observe how it was used.
//!
//! # Example
//!
//! ```ignore
//! use custom_graphs_repository::{InMemoryCatalogStore, InMemoryGroupResolver};
//! use custom_graphs_shared::{GraphDefinition, GraphSource, UserId};
//!
//! let store = InMemoryCatalogStore::new();
//! store.add_graph(GraphDefinition::new(1, "Latency", UserId::from("admin"), 0));
//! store.add_source(GraphSource::new(1, 42, 1.0));
//!
//! let resolver = InMemoryGroupResolver::new();
//! resolver.add_group(2, "Servers");
//! resolver.grant(&UserId::from("operator"), 2, "IR".parse()?);
//! ```

mod catalog_store;
mod group_resolver;

pub use catalog_store::InMemoryCatalogStore;
pub use group_resolver::InMemoryGroupResolver;
