use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use custom_graphs_shared::{AccessibleGroups, GroupId, GroupMembership, UserId, ALL_GROUP_ID};

use crate::types::{apply_all_group, Privilege, RequiredPrivileges};
use crate::{GroupResolver, GroupResolverError};

struct Grant {
    group_id: GroupId,
    privileges: Vec<Privilege>,
}

/// Group resolver backed by in-process grants.
///
/// Mirrors the PostgreSQL resolver: a grant on group 0 gives access to every
/// registered group, and administrators see every registered group.
#[derive(Default)]
pub struct InMemoryGroupResolver {
    groups: RwLock<Vec<GroupMembership>>,
    grants: RwLock<HashMap<UserId, Vec<Grant>>>,
    admins: RwLock<Vec<UserId>>,
}

impl InMemoryGroupResolver {
    /// Create a resolver with no groups and no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group.
    pub fn add_group(&self, group_id: GroupId, name: impl Into<String>) {
        self.groups
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(GroupMembership {
                group_id,
                name: name.into(),
            });
    }

    /// Grant `privileges` to `user_id` on `group_id`.
    pub fn grant(&self, user_id: &UserId, group_id: GroupId, privileges: RequiredPrivileges) {
        self.grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.clone())
            .or_default()
            .push(Grant {
                group_id,
                privileges: privileges.privileges().to_vec(),
            });
    }

    /// Make `user_id` an administrator.
    pub fn add_admin(&self, user_id: &UserId) {
        self.admins
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(user_id.clone());
    }

    fn registered_groups(&self) -> AccessibleGroups {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|group| group.group_id != ALL_GROUP_ID)
            .cloned()
            .collect()
    }

    fn group_name(&self, group_id: GroupId) -> String {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|group| group.group_id == group_id)
            .map(|group| group.name.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GroupResolver for InMemoryGroupResolver {
    async fn resolve_accessible_groups(
        &self,
        user_id: &UserId,
        privileges: &RequiredPrivileges,
        include_all_group: bool,
    ) -> Result<AccessibleGroups, GroupResolverError> {
        let is_admin = self
            .admins
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id);

        let groups = if is_admin {
            self.registered_groups()
        } else {
            let granted: Vec<GroupId> = self
                .grants
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(user_id)
                .map(|grants| {
                    grants
                        .iter()
                        .filter(|grant| privileges.is_satisfied_by(&grant.privileges))
                        .map(|grant| grant.group_id)
                        .collect()
                })
                .unwrap_or_default();

            if granted.contains(&ALL_GROUP_ID) {
                self.registered_groups()
            } else {
                let mut groups = AccessibleGroups::new();
                for group_id in granted {
                    groups.insert(group_id, self.group_name(group_id));
                }
                groups
            }
        };

        Ok(apply_all_group(groups, include_all_group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> InMemoryGroupResolver {
        let resolver = InMemoryGroupResolver::new();
        resolver.add_group(2, "Servers");
        resolver.add_group(5, "Databases");
        resolver.add_group(9, "Network");
        resolver
    }

    fn ir() -> RequiredPrivileges {
        RequiredPrivileges::default()
    }

    #[tokio::test]
    async fn test_grants_filtered_by_privileges() {
        let resolver = resolver();
        let user = UserId::from("operator");
        resolver.grant(&user, 2, "IR".parse().unwrap());
        resolver.grant(&user, 5, "AR".parse().unwrap());

        let groups = resolver
            .resolve_accessible_groups(&user, &ir(), false)
            .await
            .unwrap();
        assert_eq!(groups.group_ids().collect::<Vec<_>>(), vec![2]);
        assert_eq!(groups.get(2).unwrap().name, "Servers");
    }

    #[tokio::test]
    async fn test_all_group_grant_expands_to_every_group() {
        let resolver = resolver();
        let user = UserId::from("operator");
        resolver.grant(&user, ALL_GROUP_ID, "IR".parse().unwrap());

        let groups = resolver
            .resolve_accessible_groups(&user, &ir(), true)
            .await
            .unwrap();
        assert_eq!(groups.group_ids().collect::<Vec<_>>(), vec![0, 2, 5, 9]);
    }

    #[tokio::test]
    async fn test_admin_sees_every_group() {
        let resolver = resolver();
        let admin = UserId::from("admin");
        resolver.add_admin(&admin);

        let groups = resolver
            .resolve_accessible_groups(&admin, &ir(), false)
            .await
            .unwrap();
        assert_eq!(groups.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_groups() {
        let groups = resolver()
            .resolve_accessible_groups(&UserId::from("ghost"), &ir(), true)
            .await
            .unwrap();
        assert!(groups.is_empty());
    }
}
