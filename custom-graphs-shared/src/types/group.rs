//! Group membership types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ids::GroupId;

/// A group a user can access, as reported by the group resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMembership {
    pub group_id: GroupId,
    pub name: String,
}

/// The set of groups a user can access for a given privilege requirement.
///
/// Keys are the accessible group ids, kept in resolution order. Only key
/// membership matters when filtering graphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessibleGroups(IndexMap<GroupId, GroupMembership>);

impl AccessibleGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any existing entry for the same id.
    pub fn insert(&mut self, group_id: GroupId, name: impl Into<String>) {
        self.0.insert(
            group_id,
            GroupMembership {
                group_id,
                name: name.into(),
            },
        );
    }

    pub fn contains(&self, group_id: GroupId) -> bool {
        self.0.contains_key(&group_id)
    }

    pub fn get(&self, group_id: GroupId) -> Option<&GroupMembership> {
        self.0.get(&group_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupMembership> {
        self.0.values()
    }
}

impl FromIterator<GroupMembership> for AccessibleGroups {
    fn from_iter<T: IntoIterator<Item = GroupMembership>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|membership| (membership.group_id, membership))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ids::ALL_GROUP_ID;

    #[test]
    fn test_insert_and_contains() {
        let mut groups = AccessibleGroups::new();
        groups.insert(ALL_GROUP_ID, "All");
        groups.insert(5, "Servers");

        assert!(groups.contains(ALL_GROUP_ID));
        assert!(groups.contains(5));
        assert!(!groups.contains(6));
        assert_eq!(groups.get(5).map(|g| g.name.as_str()), Some("Servers"));
    }

    #[test]
    fn test_keeps_resolution_order() {
        let groups: AccessibleGroups = [9, 2, 4]
            .into_iter()
            .map(|group_id| GroupMembership {
                group_id,
                name: format!("group-{}", group_id),
            })
            .collect();

        assert_eq!(groups.group_ids().collect::<Vec<_>>(), vec![9, 2, 4]);
    }
}
