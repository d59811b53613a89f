//! Privilege types and group resolution helpers shared by resolver implementations.

use std::fmt;
use std::str::FromStr;

use custom_graphs_shared::{AccessibleGroups, GroupMembership, ALL_GROUP_ID};

use crate::errors::GroupResolverError;

/// Display name of the "All" pseudo-group.
pub const ALL_GROUP_NAME: &str = "All";

/// A single access-control privilege, identified by its two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Privilege {
    /// `AR`: view agents and their modules.
    AgentRead,
    /// `AW`: edit agents.
    AgentWrite,
    /// `AM`: manage agents.
    AgentManagement,
    /// `LW`: edit alerts.
    AlertWrite,
    /// `LM`: manage alerts.
    AlertManagement,
    /// `IR`: view incidents and inventory.
    IncidentRead,
    /// `IW`: edit incidents.
    IncidentWrite,
    /// `IM`: manage incidents.
    IncidentManagement,
    /// `ER`: view events.
    EventRead,
    /// `EW`: edit events.
    EventWrite,
    /// `EM`: manage events.
    EventManagement,
    /// `RR`: view reports and custom graphs.
    ReportRead,
    /// `RW`: edit reports and custom graphs.
    ReportWrite,
    /// `RM`: manage reports and custom graphs.
    ReportManagement,
    /// `UM`: manage users.
    UserManagement,
    /// `DM`: manage the database.
    DatabaseManagement,
    /// `PM`: system management.
    SystemManagement,
}

impl Privilege {
    pub const ALL: &'static [Privilege] = &[
        Privilege::AgentRead,
        Privilege::AgentWrite,
        Privilege::AgentManagement,
        Privilege::AlertWrite,
        Privilege::AlertManagement,
        Privilege::IncidentRead,
        Privilege::IncidentWrite,
        Privilege::IncidentManagement,
        Privilege::EventRead,
        Privilege::EventWrite,
        Privilege::EventManagement,
        Privilege::ReportRead,
        Privilege::ReportWrite,
        Privilege::ReportManagement,
        Privilege::UserManagement,
        Privilege::DatabaseManagement,
        Privilege::SystemManagement,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Privilege::AgentRead => "AR",
            Privilege::AgentWrite => "AW",
            Privilege::AgentManagement => "AM",
            Privilege::AlertWrite => "LW",
            Privilege::AlertManagement => "LM",
            Privilege::IncidentRead => "IR",
            Privilege::IncidentWrite => "IW",
            Privilege::IncidentManagement => "IM",
            Privilege::EventRead => "ER",
            Privilege::EventWrite => "EW",
            Privilege::EventManagement => "EM",
            Privilege::ReportRead => "RR",
            Privilege::ReportWrite => "RW",
            Privilege::ReportManagement => "RM",
            Privilege::UserManagement => "UM",
            Privilege::DatabaseManagement => "DM",
            Privilege::SystemManagement => "PM",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Privilege {
    type Err = GroupResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Privilege::ALL
            .iter()
            .copied()
            .find(|privilege| privilege.code() == code)
            .ok_or_else(|| GroupResolverError::InvalidPrivileges(format!("unknown code '{}'", s)))
    }
}

/// The privileges a user must hold in a group for the group to be accessible.
///
/// Parses from one or more two-letter codes separated by commas or whitespace,
/// e.g. `"IR"` or `"AR, IR"`. Defaults to `IR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPrivileges(Vec<Privilege>);

impl RequiredPrivileges {
    /// Build a privilege set, dropping duplicates.
    pub fn new(privileges: impl IntoIterator<Item = Privilege>) -> Result<Self, GroupResolverError> {
        let mut collected: Vec<Privilege> = Vec::new();
        for privilege in privileges {
            if !collected.contains(&privilege) {
                collected.push(privilege);
            }
        }
        if collected.is_empty() {
            return Err(GroupResolverError::InvalidPrivileges(
                "at least one privilege is required".to_string(),
            ));
        }
        Ok(Self(collected))
    }

    pub fn privileges(&self) -> &[Privilege] {
        &self.0
    }

    /// The privilege codes, e.g. `["AR", "IR"]`.
    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|p| p.code().to_string()).collect()
    }

    /// Whether `granted` covers every required privilege.
    pub fn is_satisfied_by(&self, granted: &[Privilege]) -> bool {
        self.0.iter().all(|required| granted.contains(required))
    }
}

impl Default for RequiredPrivileges {
    fn default() -> Self {
        Self(vec![Privilege::IncidentRead])
    }
}

impl fmt::Display for RequiredPrivileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.codes().join(","))
    }
}

impl FromStr for RequiredPrivileges {
    type Err = GroupResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|code| !code.is_empty())
            .map(Privilege::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }
}

/// Apply the "All" pseudo-group rule to a resolved set of groups.
///
/// With `include_all_group` set, the "All" group is placed first whenever the
/// user can access at least one group. Without it, any "All" entry is removed.
pub fn apply_all_group(groups: AccessibleGroups, include_all_group: bool) -> AccessibleGroups {
    let real_groups = groups.iter().filter(|g| g.group_id != ALL_GROUP_ID).cloned();

    if !include_all_group || groups.is_empty() {
        return real_groups.collect();
    }

    std::iter::once(GroupMembership {
        group_id: ALL_GROUP_ID,
        name: ALL_GROUP_NAME.to_string(),
    })
    .chain(real_groups)
    .collect()
}
