//! The tab (route) table.
//!
//! Binds dashboard route paths to the single permission required to open
//! them. Lookups are exact string matches. A path with no binding carries
//! no restriction at all.

use serde::Serialize;

use crate::permission::Permission;

/// A route path and the permission required to open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabBinding {
    /// Route path, e.g. `/dashboard`.
    pub path: &'static str,
    /// Permission required to open the route.
    pub required: Permission,
}

const fn bind(path: &'static str, required: Permission) -> TabBinding {
    TabBinding { path, required }
}

/// Every gated route.
pub static TAB_PERMISSIONS: &[TabBinding] = &[
    bind("/dashboard", Permission::ViewDashboard),
    bind("/analytics", Permission::ViewAnalytics),
    bind("/reports", Permission::ViewReports),
    bind("/agents", Permission::ViewAgents),
    bind("/agent-management", Permission::EditAgents),
    bind("/performance", Permission::ViewPerformance),
    bind("/revenue", Permission::ViewRevenue),
    bind("/revenue-recovery", Permission::ViewRevenueRecovery),
    bind("/leaderboard", Permission::ViewLeaderboard),
    bind("/gamification", Permission::ManageGamification),
    bind("/alerts", Permission::ViewAlerts),
    bind("/service-orders", Permission::ViewServiceOrders),
    bind("/technicians", Permission::ViewTechnicians),
    bind("/dispatch", Permission::DispatchTechnicians),
    bind("/customers", Permission::ViewCustomers),
    bind("/call-logs", Permission::ViewCallLogs),
    bind("/coordination", Permission::ViewCoordination),
    bind("/schedule", Permission::ViewSchedule),
    bind("/inventory", Permission::ViewInventory),
    bind("/user-management", Permission::ManageUsers),
    bind("/audit-logs", Permission::ViewAuditLogs),
    bind("/settings", Permission::ManageSettings),
    bind("/integrations", Permission::ManageIntegrations),
    bind("/system-health", Permission::ViewSystemHealth),
];

/// Find the binding for `path`, if it is gated.
pub fn find_tab(path: &str) -> Option<&'static TabBinding> {
    TAB_PERMISSIONS.iter().find(|b| b.path == path)
}

/// The permission required to open `path`, or `None` if the route is open.
pub fn required_permission(path: &str) -> Option<Permission> {
    find_tab(path).map(|b| b.required)
}
