//! # Custom Graphs Repository
//!
//! This crate provides traits and implementations for the collaborators the
//! custom graphs core reads from: the graph catalog and the group resolver.
//! It includes definitions for errors, interfaces, a PostgreSQL implementation
//! and an in-memory implementation for tests and local development.

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;
pub mod types;

pub use errors::{CatalogError, GroupResolverError};
pub use interfaces::{CatalogStore, GroupResolver};
pub use memory::{InMemoryCatalogStore, InMemoryGroupResolver};
pub use postgres::{PostgresCatalogStore, PostgresGroupResolver};
pub use types::{Privilege, RequiredPrivileges};
