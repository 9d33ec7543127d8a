use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use super::service::{ChatReply, ChatRequest, ChatbotService};
use crate::error::AppError;

pub fn chatbot_router(service: Arc<ChatbotService>) -> Router {
    Router::new()
        .route("/api/chatbot", post(chat_handler))
        .with_state(service)
}

pub(crate) async fn chat_handler(
    State(service): State<Arc<ChatbotService>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload?;
    Ok(Json(service.respond(&request).await?))
}
