use custom_graphs_shared::{AccessibleGroups, UserId};

use crate::errors::GroupResolverError;
use crate::types::RequiredPrivileges;

/// Trait for resolving the groups a user may view.
///
/// The answer must be stable for a given user, privilege set and
/// `include_all_group` flag within one request. When `include_all_group` is
/// set and the user can access at least one group, the "All" pseudo-group
/// (id 0) is part of the answer.
#[async_trait::async_trait]
pub trait GroupResolver: Send + Sync {
    async fn resolve_accessible_groups(
        &self,
        user_id: &UserId,
        privileges: &RequiredPrivileges,
        include_all_group: bool,
    ) -> Result<AccessibleGroups, GroupResolverError>;
}
