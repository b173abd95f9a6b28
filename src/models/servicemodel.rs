use bigdecimal::BigDecimal;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Service {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Images keep insertion order via `position`; the first one is the cover.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ServiceImage {
    pub id: Uuid,
    pub service_id: Uuid,
    pub image_url: String,
    pub position: i32,
}

/// Public listing row: service joined with its seller and cover image.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct ServiceListing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub location: Option<String>,
    pub seller_name: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
