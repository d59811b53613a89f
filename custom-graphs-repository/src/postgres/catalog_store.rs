//! PostgreSQL implementation of the graph catalog.
//!
//! Reads graph definitions from the `graphs` table and their weighted sources
//! from `graph_sources`. Source order is the insertion order (`graph_sources.id`).
//!
//! ## Database Tables
//!
//! - `graphs`: Graph definitions with owner, visibility group and presentation defaults
//! - `graph_sources`: One row per (module, weight) pair of a graph
use std::collections::HashMap;

use async_trait::async_trait;
use custom_graphs_shared::{GraphDefinition, GraphId, GraphSource, UserId};
use tracing::{debug, warn};

use crate::{CatalogError, CatalogStore};

const GRAPH_COLUMNS: &str = "id, name, owner_user_id, group_id, private, description, \
     period_seconds, width, height, stacked";

#[derive(Debug, sqlx::FromRow)]
struct GraphRow {
    id: i64,
    name: String,
    owner_user_id: String,
    group_id: i64,
    private: bool,
    description: String,
    period_seconds: i64,
    width: i32,
    height: i32,
    stacked: bool,
}

impl GraphRow {
    fn into_definition(self, width: u32, height: u32) -> GraphDefinition {
        GraphDefinition {
            id: self.id,
            name: self.name,
            owner_user_id: UserId::from(self.owner_user_id),
            group_id: self.group_id,
            is_private: self.private,
            description: self.description,
            period_seconds: self.period_seconds,
            width,
            height,
            stacked: self.stacked,
        }
    }

    /// Conversion for catalog listings: out-of-range dimensions fall back to
    /// the defaults with a warning. `get_graph` still rejects them.
    fn into_listed(self) -> GraphDefinition {
        let width = u32::try_from(self.width).unwrap_or_else(|_| {
            warn!(graph_id = self.id, width = self.width, "Invalid stored width, using default");
            GraphDefinition::DEFAULT_WIDTH
        });
        let height = u32::try_from(self.height).unwrap_or_else(|_| {
            warn!(graph_id = self.id, height = self.height, "Invalid stored height, using default");
            GraphDefinition::DEFAULT_HEIGHT
        });
        self.into_definition(width, height)
    }
}

impl TryFrom<GraphRow> for GraphDefinition {
    type Error = CatalogError;

    fn try_from(row: GraphRow) -> Result<Self, Self::Error> {
        let width = u32::try_from(row.width).map_err(|_| {
            CatalogError::invalid_record(format!("graph {} has width {}", row.id, row.width))
        })?;
        let height = u32::try_from(row.height).map_err(|_| {
            CatalogError::invalid_record(format!("graph {} has height {}", row.id, row.height))
        })?;

        Ok(row.into_definition(width, height))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SourceRow {
    graph_id: i64,
    module_id: i64,
    weight: f64,
}

impl From<SourceRow> for GraphSource {
    fn from(row: SourceRow) -> Self {
        GraphSource::new(row.graph_id, row.module_id, row.weight)
    }
}

fn to_count(graph_id: GraphId, count: i64) -> Result<u64, CatalogError> {
    u64::try_from(count).map_err(|_| {
        CatalogError::invalid_record(format!("graph {} has source count {}", graph_id, count))
    })
}

/// PostgreSQL-backed graph catalog.
///
/// Read-only: every method issues a single query on the shared pool.
pub struct PostgresCatalogStore {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgreSQL catalog store.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the custom graphs schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn list_all_graphs(&self) -> Result<Vec<GraphDefinition>, CatalogError> {
        let rows: Vec<GraphRow> = sqlx::query_as(&format!(
            "SELECT {} FROM graphs ORDER BY name, id",
            GRAPH_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(graphs = rows.len(), "Listed graph catalog");
        Ok(rows.into_iter().map(GraphRow::into_listed).collect())
    }

    async fn get_graph(&self, graph_id: GraphId) -> Result<Option<GraphDefinition>, CatalogError> {
        let row: Option<GraphRow> = sqlx::query_as(&format!(
            "SELECT {} FROM graphs WHERE id = $1",
            GRAPH_COLUMNS
        ))
        .bind(graph_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(GraphDefinition::try_from).transpose()
    }

    async fn list_sources(&self, graph_id: GraphId) -> Result<Vec<GraphSource>, CatalogError> {
        let rows: Vec<SourceRow> = sqlx::query_as(
            "SELECT graph_id, module_id, weight FROM graph_sources WHERE graph_id = $1 ORDER BY id",
        )
        .bind(graph_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GraphSource::from).collect())
    }

    async fn count_sources(&self, graph_id: GraphId) -> Result<u64, CatalogError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(id) FROM graph_sources WHERE graph_id = $1")
                .bind(graph_id)
                .fetch_one(&self.pool)
                .await?;

        to_count(graph_id, count)
    }

    /// Counts sources for all requested graphs with a single grouped query.
    async fn count_sources_batch(
        &self,
        graph_ids: &[GraphId],
    ) -> Result<HashMap<GraphId, u64>, CatalogError> {
        if graph_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT graph_id, COUNT(id) FROM graph_sources WHERE graph_id = ANY($1) GROUP BY graph_id",
        )
        .bind(graph_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut counts: HashMap<GraphId, u64> = graph_ids.iter().map(|&id| (id, 0)).collect();
        for (graph_id, count) in rows {
            counts.insert(graph_id, to_count(graph_id, count)?);
        }
        Ok(counts)
    }
}
