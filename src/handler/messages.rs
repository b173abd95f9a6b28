use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::messagedtos::{SendMessageDto, ThreadQueryDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/conversations", get(get_conversations))
        .route("/:user_id", get(get_thread_messages))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state
        .message_service
        .send_message(&auth.user, body.receiver_id, body.content, body.booking_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Message sent",
            "data": message
        })),
    ))
}

pub async fn get_conversations(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let conversations = app_state
        .message_service
        .get_conversations(auth.user.id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": conversations
    })))
}

/// Without `booking_id` this returns only the general thread; booking-scoped
/// messages never leak into it.
pub async fn get_thread_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(other_user_id): Path<Uuid>,
    Query(query): Query<ThreadQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .message_service
        .get_thread(auth.user.id, other_user_id, query.booking_id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": messages
    })))
}
