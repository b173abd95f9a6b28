use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages are immutable once created. A null `booking_id` means the message
/// belongs to the general thread between the two users; a set `booking_id`
/// scopes it to that booking's thread. The two sets never mix.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub booking_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Message joined with both parties' display data and the booking's service
/// title, as fetched for the conversation list.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct MessageWithParties {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub booking_id: Option<Uuid>,
    pub sender_name: String,
    pub sender_picture: Option<String>,
    pub receiver_name: String,
    pub receiver_picture: Option<String>,
    pub service_title: Option<String>,
    pub created_at: DateTime<Utc>,
}
