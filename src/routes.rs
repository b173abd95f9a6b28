use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler,
        bookings::bookings_handler,
        messages::messages_handler,
        notifications::notifications_handler,
        reviews::{public_reviews_handler, reviews_handler},
        services::{public_services_handler, services_handler},
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "CaptureCrew API is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Listing and service detail are public; mutations require auth. The
    // merged method routers keep the auth layer scoped to the protected side.
    let service_routes = public_services_handler()
        .merge(services_handler().layer(middleware::from_fn(auth)));

    let review_routes = public_reviews_handler()
        .merge(reviews_handler().layer(middleware::from_fn(auth)));

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/services", service_routes)
        .nest(
            "/bookings",
            bookings_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/messages",
            messages_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/reviews", review_routes)
        .nest(
            "/notifications",
            notifications_handler().layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
