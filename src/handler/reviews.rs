use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::reviewdtos::AddReviewDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    service::review_service::rating_summary,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new().route("/", post(add_review))
}

pub fn public_reviews_handler() -> Router {
    Router::new().route("/service/:service_id", get(get_service_reviews))
}

pub async fn add_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<AddReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .review_service
        .add_review(auth.user.id, body.booking_id, body.rating, body.comment)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Review added successfully",
            "review": review
        })),
    ))
}

pub async fn get_service_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state.review_service.service_reviews(service_id).await?;

    let (average_rating, review_count) = rating_summary(&reviews);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "reviews": reviews,
            "average_rating": average_rating,
            "review_count": review_count
        }
    })))
}
