//! Admin-only aggregate views.

pub mod dashboard;
pub mod router;

pub use dashboard::{DashboardService, DashboardSummary, RecentLead};
pub use router::admin_router;
