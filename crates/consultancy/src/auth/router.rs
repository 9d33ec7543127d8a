use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::domain::AdminProfile;
use super::extract::AuthenticatedAdmin;
use super::service::{AuthService, LoginRequest, LoginResponse};
use crate::error::AppError;

pub fn auth_router(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler))
        .with_state(service)
}

pub(crate) async fn login_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = payload?;
    let response = tokio::task::spawn_blocking(move || service.login(&request))
        .await
        .map_err(|err| AppError::Internal(format!("login task failed: {err}")))??;
    Ok(Json(response))
}

pub(crate) async fn me_handler(
    State(service): State<Arc<AuthService>>,
    admin: AuthenticatedAdmin,
) -> Result<Json<AdminProfile>, AppError> {
    service
        .profile(&admin.0.sub)?
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_string()))
}
