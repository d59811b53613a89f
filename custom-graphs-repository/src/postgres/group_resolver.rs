//! PostgreSQL implementation of the group resolver.
//!
//! Administrators can access every group. Other users can access the groups of
//! their `user_profiles` rows whose profile grants every required privilege; a
//! profile row on group 0 grants every group.

use async_trait::async_trait;
use custom_graphs_shared::{AccessibleGroups, GroupMembership, UserId, ALL_GROUP_ID};
use tracing::debug;

use crate::types::{apply_all_group, RequiredPrivileges};
use crate::{GroupResolver, GroupResolverError};

/// PostgreSQL-backed group resolver.
pub struct PostgresGroupResolver {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
}

impl PostgresGroupResolver {
    /// Creates a new PostgreSQL group resolver.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the custom graphs schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    async fn all_groups(&self) -> Result<AccessibleGroups, GroupResolverError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM groups WHERE id > 0 ORDER BY name, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(group_id, name)| GroupMembership { group_id, name })
            .collect())
    }

    async fn granted_groups(
        &self,
        user_id: &UserId,
        privileges: &RequiredPrivileges,
    ) -> Result<AccessibleGroups, GroupResolverError> {
        let rows: Vec<(i64, Option<String>)> = sqlx::query_as(
            r#"
            SELECT DISTINCT up.group_id, g.name
            FROM user_profiles up
            JOIN profiles p ON p.id = up.profile_id
            LEFT JOIN groups g ON g.id = up.group_id
            WHERE up.user_id = $1 AND p.privileges @> $2::text[]
            ORDER BY g.name, up.group_id
            "#,
        )
        .bind(user_id.as_str())
        .bind(privileges.codes())
        .fetch_all(&self.pool)
        .await?;

        if rows.iter().any(|(group_id, _)| *group_id == ALL_GROUP_ID) {
            return self.all_groups().await;
        }

        Ok(rows
            .into_iter()
            .map(|(group_id, name)| GroupMembership {
                group_id,
                name: name.unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl GroupResolver for PostgresGroupResolver {
    async fn resolve_accessible_groups(
        &self,
        user_id: &UserId,
        privileges: &RequiredPrivileges,
        include_all_group: bool,
    ) -> Result<AccessibleGroups, GroupResolverError> {
        let is_admin: Option<bool> = sqlx::query_scalar("SELECT is_admin FROM users WHERE id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let groups = match is_admin {
            None => {
                debug!(user_id = %user_id, "Unknown user has no accessible groups");
                AccessibleGroups::new()
            }
            Some(true) => self.all_groups().await?,
            Some(false) => self.granted_groups(user_id, privileges).await?,
        };

        let groups = apply_all_group(groups, include_all_group);
        debug!(
            user_id = %user_id,
            privileges = %privileges,
            include_all_group,
            groups = groups.len(),
            "Resolved accessible groups"
        );
        Ok(groups)
    }
}
