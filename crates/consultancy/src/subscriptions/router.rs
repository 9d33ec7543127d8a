use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::domain::{Subscription, SubscriptionForm, UnsubscribeForm};
use super::service::{SubscribeOutcome, SubscriptionService};
use crate::auth::{AuthenticatedAdmin, Role};
use crate::error::AppError;

pub fn subscription_router(service: Arc<SubscriptionService>) -> Router {
    Router::new()
        .route("/api/subscriptions", post(subscribe_handler))
        .route("/api/subscriptions/unsubscribe", post(unsubscribe_handler))
        .route("/api/admin/subscriptions", get(list_handler))
        .with_state(service)
}

pub(crate) async fn subscribe_handler(
    State(service): State<Arc<SubscriptionService>>,
    payload: Result<Json<SubscriptionForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(form) = payload?;
    let outcome = service.subscribe(&form)?;
    let status = match outcome {
        SubscribeOutcome::Created(_) => StatusCode::CREATED,
        SubscribeOutcome::Reactivated(_) => StatusCode::OK,
    };
    let subscription = outcome.subscription();

    Ok((
        status,
        Json(json!({
            "success": true,
            "message": "Thanks for subscribing!",
            "subscriptionId": subscription.id,
        })),
    ))
}

pub(crate) async fn unsubscribe_handler(
    State(service): State<Arc<SubscriptionService>>,
    payload: Result<Json<UnsubscribeForm>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(form) = payload?;
    service.unsubscribe(&form)?;
    Ok(Json(json!({
        "success": true,
        "message": "You have been unsubscribed.",
    })))
}

pub(crate) async fn list_handler(
    State(service): State<Arc<SubscriptionService>>,
    admin: AuthenticatedAdmin,
) -> Result<Json<Vec<Subscription>>, AppError> {
    admin.require(Role::Admin)?;
    Ok(Json(service.list()?))
}
