//! The role table.
//!
//! Each [`Role`] maps to a fixed slice of [`Permission`]s. Roles are flat:
//! `admin` is not "above" anything, it simply enumerates the whole catalog.
//! There is no runtime mutation of these tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AclError, Result};
use crate::permission::Permission;
use crate::suggest;

use Permission::*;

/// A named bundle of permissions assigned to a class of user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full catalog.
    Admin,
    /// Read-mostly business overview.
    Executive,
    /// Runs teams, agents, alerts, and service operations.
    Manager,
    /// Operates agents and the dispatch floor.
    Operator,
    /// Front-line customer agent.
    Agent,
    /// Human coordinator handling escalations and dispatch.
    HumanCoordinator,
    /// Technician in the field.
    FieldTechnician,
}

const EXECUTIVE: &[Permission] = &[
    ViewDashboard,
    ViewAnalytics,
    ExportAnalytics,
    ViewReports,
    ExportReports,
    ViewAgents,
    ViewPerformance,
    ViewRevenue,
    ViewRevenueRecovery,
    ViewLeaderboard,
    ViewAlerts,
    ViewServiceOrders,
    ViewTechnicians,
    ViewCustomers,
    ViewCoordination,
    ViewSchedule,
    ViewAuditLogs,
    ViewSystemHealth,
];

const MANAGER: &[Permission] = &[
    ViewDashboard,
    ViewAnalytics,
    ExportAnalytics,
    ViewReports,
    ExportReports,
    ViewAgents,
    EditAgents,
    ConfigureAgents,
    ViewPerformance,
    ViewRevenue,
    ViewRevenueRecovery,
    ManageRevenueRecovery,
    ViewLeaderboard,
    ManageGamification,
    ViewAlerts,
    CreateAlerts,
    EditAlerts,
    DeleteAlerts,
    ViewServiceOrders,
    CreateServiceOrders,
    EditServiceOrders,
    AssignServiceOrders,
    ViewTechnicians,
    ManageTechnicians,
    DispatchTechnicians,
    ViewCustomers,
    EditCustomers,
    ViewCallLogs,
    ViewCallRecordings,
    ViewCoordination,
    ManageEscalations,
    ViewSchedule,
    ManageSchedule,
    ViewInventory,
    ViewUsers,
];

const OPERATOR: &[Permission] = &[
    ViewDashboard,
    ViewAnalytics,
    ViewAgents,
    EditAgents,
    ConfigureAgents,
    ViewPerformance,
    ViewAlerts,
    CreateAlerts,
    EditAlerts,
    ViewServiceOrders,
    EditServiceOrders,
    AssignServiceOrders,
    ViewTechnicians,
    DispatchTechnicians,
    ViewCallLogs,
    ViewCoordination,
    ViewSchedule,
    ViewInventory,
    ViewSystemHealth,
];

const AGENT: &[Permission] = &[
    ViewDashboard,
    ViewPerformance,
    ViewLeaderboard,
    ViewAlerts,
    ViewServiceOrders,
    CreateServiceOrders,
    ViewCustomers,
    ViewCallLogs,
    ViewSchedule,
];

const HUMAN_COORDINATOR: &[Permission] = &[
    ViewDashboard,
    ViewAgents,
    ViewAlerts,
    ViewServiceOrders,
    CreateServiceOrders,
    EditServiceOrders,
    AssignServiceOrders,
    ViewTechnicians,
    DispatchTechnicians,
    ViewCustomers,
    EditCustomers,
    ViewCallLogs,
    ViewCallRecordings,
    ManageCommunications,
    ViewCoordination,
    ManageEscalations,
    ViewSchedule,
    ManageSchedule,
];

// No view_dashboard: technicians land on their service orders instead.
const FIELD_TECHNICIAN: &[Permission] = &[
    ViewAnalytics,
    ViewAgents,
    ViewServiceOrders,
    ViewTechnicians,
];

impl Role {
    /// Every role, in table order.
    pub const ALL: &'static [Role] = &[
        Role::Admin,
        Role::Executive,
        Role::Manager,
        Role::Operator,
        Role::Agent,
        Role::HumanCoordinator,
        Role::FieldTechnician,
    ];

    /// The role's key as used in config files and on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Executive => "executive",
            Role::Manager => "manager",
            Role::Operator => "operator",
            Role::Agent => "agent",
            Role::HumanCoordinator => "human_coordinator",
            Role::FieldTechnician => "field_technician",
        }
    }

    /// The permissions granted to this role.
    pub const fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => Permission::ALL,
            Role::Executive => EXECUTIVE,
            Role::Manager => MANAGER,
            Role::Operator => OPERATOR,
            Role::Agent => AGENT,
            Role::HumanCoordinator => HUMAN_COORDINATOR,
            Role::FieldTechnician => FIELD_TECHNICIAN,
        }
    }

    /// Returns `true` if this role is granted `permission`.
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Look up a role by key. Exact match only.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == name)
    }

    /// Iterate over every role key.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(Role::as_str)
    }
}

/// Table lookup: the permissions bound to `role`.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    role.permissions()
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| AclError::UnknownRole {
            name: s.to_string(),
            suggestion: suggest::closest(s, Self::names()).map(str::to_string),
        })
    }
}
