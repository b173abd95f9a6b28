use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{servicedb::ServiceExt, userdb::UserExt},
    dtos::servicedtos::{CreateServiceDto, ServiceQueryDto, UpdateServiceDto},
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    models::usermodel::UserRole,
    AppState,
};

pub fn public_services_handler() -> Router {
    Router::new()
        .route("/", get(get_all_services))
        .route("/:service_id", get(get_service_details))
}

pub fn services_handler() -> Router {
    Router::new()
        .route("/", post(create_service))
        .route("/my-services", get(get_my_services))
        .route(
            "/:service_id",
            put(update_service).delete(delete_service),
        )
}

pub async fn create_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.role != UserRole::Seller {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let service = app_state
        .db_client
        .create_service(
            auth.user.id,
            body.title,
            body.description,
            body.price,
            body.category,
            body.location,
            body.image_urls,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": service
        })),
    ))
}

pub async fn get_all_services(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ServiceQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let services = app_state
        .db_client
        .get_all_services(query.search.as_deref(), query.category.as_deref())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": services
    })))
}

pub async fn get_service_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let service = app_state
        .db_client
        .get_service_by_id(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Service not found"))?;

    let images = app_state
        .db_client
        .get_service_images(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let seller = app_state
        .db_client
        .get_user(Some(service.seller_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Seller not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "service": service,
            "images": images,
            "seller": {
                "id": seller.id,
                "username": seller.username,
                "profile_picture": seller.profile_picture
            }
        }
    })))
}

pub async fn get_my_services(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let services = app_state
        .db_client
        .get_seller_services(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": services
    })))
}

pub async fn update_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(service_id): Path<Uuid>,
    Json(body): Json<UpdateServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Scoped to owner in the query; non-owners get "not found".
    let service = app_state
        .db_client
        .update_service(
            service_id,
            auth.user.id,
            body.title,
            body.description,
            body.price,
            body.category,
            body.location,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Service not found or unauthorized"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": service
    })))
}

pub async fn delete_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_service(service_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::not_found("Service not found or unauthorized"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Service deleted"
    })))
}
