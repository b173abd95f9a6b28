use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::bookingdtos::{CreateBookingDto, UpdateBookingStatusDto, UpdatePaymentStatusDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", post(create_booking))
        .route("/my-bookings", get(get_my_bookings))
        .route("/seller-bookings", get(get_seller_bookings))
        .route("/:booking_id/status", put(update_booking_status))
        .route("/:booking_id/payment", put(update_payment_status))
        .route("/:booking_id/complete", put(complete_booking))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .booking_service
        .create_booking(
            &auth.user,
            body.service_id,
            body.booking_date,
            body.contact_info,
            body.location,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Booking created successfully",
            "bookingId": booking.id
        })),
    ))
}

pub async fn get_my_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .booking_service
        .customer_bookings(auth.user.id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": bookings
    })))
}

pub async fn get_seller_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .booking_service
        .seller_bookings(auth.user.id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": bookings
    })))
}

pub async fn update_booking_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .booking_service
        .update_status(booking_id, auth.user.id, &body.status)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Booking status updated",
        "data": booking
    })))
}

pub async fn update_payment_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdatePaymentStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .booking_service
        .update_payment_status(booking_id, auth.user.id, &body.payment_status)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Payment status updated",
        "data": booking
    })))
}

pub async fn complete_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .complete_booking(booking_id, auth.user.id)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Booking marked as completed",
        "data": booking
    })))
}
