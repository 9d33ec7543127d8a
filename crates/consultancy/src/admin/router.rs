use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use super::dashboard::{DashboardService, DashboardSummary};
use crate::auth::{AuthenticatedAdmin, Role};
use crate::error::AppError;

pub fn admin_router(dashboard: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/admin/dashboard", get(dashboard_handler))
        .with_state(dashboard)
}

pub(crate) async fn dashboard_handler(
    State(dashboard): State<Arc<DashboardService>>,
    admin: AuthenticatedAdmin,
) -> Result<Json<DashboardSummary>, AppError> {
    admin.require(Role::Admin)?;
    Ok(Json(dashboard.summary(Utc::now())?))
}
