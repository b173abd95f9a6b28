use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Message,
    BookingRequest,
    BookingUpdate,
}

impl NotificationType {
    pub fn to_str(&self) -> &str {
        match self {
            NotificationType::Message => "message",
            NotificationType::BookingRequest => "booking_request",
            NotificationType::BookingUpdate => "booking_update",
        }
    }
}

/// What a notification points at. The stored row keeps a bare `related_id`
/// column next to the type; this tagged form is the only way producers hand
/// an id to the dispatcher, so a message notification cannot end up carrying
/// a booking id or vice versa.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    Message { sender_id: Uuid },
    BookingRequest { booking_id: Uuid },
    BookingUpdate { booking_id: Uuid },
}

impl NotificationPayload {
    pub fn notification_type(&self) -> NotificationType {
        match self {
            NotificationPayload::Message { .. } => NotificationType::Message,
            NotificationPayload::BookingRequest { .. } => NotificationType::BookingRequest,
            NotificationPayload::BookingUpdate { .. } => NotificationType::BookingUpdate,
        }
    }

    pub fn related_id(&self) -> Uuid {
        match self {
            NotificationPayload::Message { sender_id } => *sender_id,
            NotificationPayload::BookingRequest { booking_id } => *booking_id,
            NotificationPayload::BookingUpdate { booking_id } => *booking_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub content: String,
    pub related_id: Uuid,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Reassemble the tagged payload from the stored (type, related_id) pair.
    pub fn payload(&self) -> NotificationPayload {
        match self.notification_type {
            NotificationType::Message => NotificationPayload::Message {
                sender_id: self.related_id,
            },
            NotificationType::BookingRequest => NotificationPayload::BookingRequest {
                booking_id: self.related_id,
            },
            NotificationType::BookingUpdate => NotificationPayload::BookingUpdate {
                booking_id: self.related_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_its_type() {
        let sender = Uuid::new_v4();
        let booking = Uuid::new_v4();

        let msg = NotificationPayload::Message { sender_id: sender };
        assert_eq!(msg.notification_type(), NotificationType::Message);
        assert_eq!(msg.related_id(), sender);

        let req = NotificationPayload::BookingRequest {
            booking_id: booking,
        };
        assert_eq!(req.notification_type(), NotificationType::BookingRequest);
        assert_eq!(req.related_id(), booking);
    }

    #[test]
    fn stored_row_round_trips_to_payload() {
        let booking = Uuid::new_v4();
        let row = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            notification_type: NotificationType::BookingUpdate,
            content: "Your booking was accepted".to_string(),
            related_id: booking,
            is_read: false,
            created_at: Utc::now(),
        };

        assert_eq!(
            row.payload(),
            NotificationPayload::BookingUpdate {
                booking_id: booking
            }
        );
    }
}
