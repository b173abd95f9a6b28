use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most one review per booking, written by the booking's customer once the
/// booking is completed.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review joined with the reviewing customer's public identity.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct ReviewWithReviewer {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub reviewer_name: String,
    pub reviewer_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}
