//! PostgreSQL implementations of the custom graphs repository interfaces.
//!
//! The schema lives in `src/postgres/migrations` and can be applied with
//! [`MIGRATOR`].
mod catalog_store;
mod group_resolver;

pub use catalog_store::PostgresCatalogStore;
pub use group_resolver::PostgresGroupResolver;

/// Embedded migrations for the custom graphs schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("src/postgres/migrations");
