//! The permission catalog.
//!
//! [`Permission`] is the closed vocabulary of capability tokens the dashboard
//! gates on. The catalog is fixed at compile time; each variant has exactly
//! one canonical snake_case token, which is also its serde representation.
//!
//! Predicates in [`crate::check`] work on plain strings, so tokens outside
//! the catalog can still be passed around. They simply never match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AclError, Result};
use crate::suggest;

macro_rules! permission_catalog {
    ($( $(#[$doc:meta])* $variant:ident => $token:literal, )+) => {
        /// A capability token from the fixed catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Permission {
            $( $(#[$doc])* $variant, )+
        }

        impl Permission {
            /// The full catalog, in declaration order.
            pub const ALL: &'static [Permission] = &[ $( Permission::$variant, )+ ];

            /// The canonical token for this permission.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Permission::$variant => $token, )+
                }
            }
        }
    };
}

permission_catalog! {
    // Dashboard and reporting
    /// Open the main dashboard.
    ViewDashboard => "view_dashboard",
    /// View analytics charts.
    ViewAnalytics => "view_analytics",
    /// Export analytics data.
    ExportAnalytics => "export_analytics",
    /// View generated reports.
    ViewReports => "view_reports",
    /// Export generated reports.
    ExportReports => "export_reports",

    // AI agent catalog
    /// View the agent roster.
    ViewAgents => "view_agents",
    /// Edit agent entries.
    EditAgents => "edit_agents",
    /// Add agents to the roster.
    CreateAgents => "create_agents",
    /// Remove agents from the roster.
    DeleteAgents => "delete_agents",
    /// Change agent configuration.
    ConfigureAgents => "configure_agents",

    // Performance and revenue
    /// View performance charts.
    ViewPerformance => "view_performance",
    /// View revenue figures.
    ViewRevenue => "view_revenue",
    /// View revenue-recovery projections.
    ViewRevenueRecovery => "view_revenue_recovery",
    /// Adjust revenue-recovery campaigns.
    ManageRevenueRecovery => "manage_revenue_recovery",

    // Gamification
    /// View leaderboards.
    ViewLeaderboard => "view_leaderboard",
    /// Configure gamification rules and rewards.
    ManageGamification => "manage_gamification",

    // Alerts
    /// View alerts.
    ViewAlerts => "view_alerts",
    /// Create alerts.
    CreateAlerts => "create_alerts",
    /// Edit alerts.
    EditAlerts => "edit_alerts",
    /// Delete alerts.
    DeleteAlerts => "delete_alerts",

    // Service orders
    /// View service orders.
    ViewServiceOrders => "view_service_orders",
    /// Create service orders.
    CreateServiceOrders => "create_service_orders",
    /// Edit service orders.
    EditServiceOrders => "edit_service_orders",
    /// Assign service orders to technicians.
    AssignServiceOrders => "assign_service_orders",

    // Field technicians
    /// View technician roster and status.
    ViewTechnicians => "view_technicians",
    /// Manage technician records.
    ManageTechnicians => "manage_technicians",
    /// Dispatch technicians to jobs.
    DispatchTechnicians => "dispatch_technicians",

    // Customers
    /// View customer records.
    ViewCustomers => "view_customers",
    /// Edit customer records.
    EditCustomers => "edit_customers",

    // Communications
    /// View call logs.
    ViewCallLogs => "view_call_logs",
    /// Listen to call recordings.
    ViewCallRecordings => "view_call_recordings",
    /// Manage outbound communications.
    ManageCommunications => "manage_communications",

    // Coordination
    /// View the human-coordination queue.
    ViewCoordination => "view_coordination",
    /// Handle escalations.
    ManageEscalations => "manage_escalations",

    // Scheduling
    /// View the schedule.
    ViewSchedule => "view_schedule",
    /// Change the schedule.
    ManageSchedule => "manage_schedule",

    // Inventory
    /// View parts inventory.
    ViewInventory => "view_inventory",
    /// Manage parts inventory.
    ManageInventory => "manage_inventory",

    // Administration
    /// View user accounts.
    ViewUsers => "view_users",
    /// Manage user accounts.
    ManageUsers => "manage_users",
    /// Assign roles to users.
    ManageRoles => "manage_roles",
    /// View the audit log.
    ViewAuditLogs => "view_audit_logs",
    /// Change system settings.
    ManageSettings => "manage_settings",
    /// Configure third-party integrations.
    ManageIntegrations => "manage_integrations",
    /// View system health.
    ViewSystemHealth => "view_system_health",
}

impl Permission {
    /// Look up a permission by its canonical token.
    ///
    /// Matching is exact: no trimming or case folding.
    pub fn lookup(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == token)
    }

    /// Iterate over every catalog token.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(Permission::as_str)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Permission {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| AclError::UnknownPermission {
            token: s.to_string(),
            suggestion: suggest::closest(s, Self::tokens()).map(str::to_string),
        })
    }
}
