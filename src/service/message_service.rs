use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, messagedb::MessageExt, userdb::UserExt},
    models::{
        messagemodel::{Message, MessageWithParties},
        notificationmodel::NotificationPayload,
        usermodel::{User, UserRole},
    },
    service::{error::ServiceError, notification_service::NotificationService},
};

pub const GENERAL_THREAD_TITLE: &str = "General Inquiry";

/// Derived thread summary. Conversations are never persisted; they are
/// recomputed from the message log on every read.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ConversationPreview {
    pub other_user_id: Uuid,
    pub other_username: String,
    pub other_profile_picture: Option<String>,
    pub booking_id: Option<Uuid>,
    pub thread_title: String,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MessageService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl MessageService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn send_message(
        &self,
        sender: &User,
        receiver_id: Uuid,
        content: String,
        booking_id: Option<Uuid>,
    ) -> Result<Message, ServiceError> {
        let receiver = self
            .db_client
            .get_user(Some(receiver_id), None)
            .await?
            .ok_or(ServiceError::ReceiverNotFound(receiver_id))?;

        if sender.role == UserRole::Seller && receiver.role == UserRole::Seller {
            return Err(ServiceError::SellerToSellerMessage);
        }

        let message = self
            .db_client
            .insert_message(sender.id, receiver_id, content, booking_id)
            .await?;

        // The notification deep-links to the sender, not the message row.
        if let Err(e) = self
            .notification_service
            .notify(
                receiver_id,
                NotificationPayload::Message {
                    sender_id: sender.id,
                },
                format!("New message from {}", sender.username),
            )
            .await
        {
            tracing::error!(
                "Failed to dispatch message notification for message {}: {}",
                message.id,
                e
            );
        }

        Ok(message)
    }

    pub async fn get_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationPreview>, ServiceError> {
        let messages = self.db_client.get_user_messages(user_id).await?;
        Ok(group_conversations(user_id, messages))
    }

    pub async fn get_thread(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        booking_id: Option<Uuid>,
    ) -> Result<Vec<Message>, ServiceError> {
        let messages = self
            .db_client
            .get_thread_messages(user_id, other_user_id, booking_id)
            .await?;
        Ok(messages)
    }
}

/// Fold a newest-first message stream into unique conversation previews.
/// The grouping key is (counterparty, booking-or-general); because the input
/// is sorted newest first, the first message seen for a key is its preview.
fn group_conversations(
    user_id: Uuid,
    messages: Vec<MessageWithParties>,
) -> Vec<ConversationPreview> {
    let mut seen: HashSet<(Uuid, Option<Uuid>)> = HashSet::new();
    let mut conversations = Vec::new();

    for message in messages {
        let (other_id, other_name, other_picture) = if message.sender_id == user_id {
            (
                message.receiver_id,
                message.receiver_name,
                message.receiver_picture,
            )
        } else {
            (
                message.sender_id,
                message.sender_name,
                message.sender_picture,
            )
        };

        if !seen.insert((other_id, message.booking_id)) {
            continue;
        }

        let thread_title = match (&message.booking_id, message.service_title) {
            (Some(_), Some(title)) => title,
            _ => GENERAL_THREAD_TITLE.to_string(),
        };

        conversations.push(ConversationPreview {
            other_user_id: other_id,
            other_username: other_name,
            other_profile_picture: other_picture,
            booking_id: message.booking_id,
            thread_title,
            last_message: message.content,
            last_message_at: message.created_at,
        });
    }

    conversations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn msg(
        sender: Uuid,
        receiver: Uuid,
        content: &str,
        booking: Option<(Uuid, &str)>,
        age_minutes: i64,
    ) -> MessageWithParties {
        MessageWithParties {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            content: content.to_string(),
            booking_id: booking.map(|(id, _)| id),
            sender_name: "sender".to_string(),
            sender_picture: None,
            receiver_name: "receiver".to_string(),
            receiver_picture: None,
            service_title: booking.map(|(_, title)| title.to_string()),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[test]
    fn groups_are_unique_per_counterparty_and_booking() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let booking = Uuid::new_v4();

        // Newest first, mixing general and booking-scoped messages with the
        // same counterparty.
        let messages = vec![
            msg(other, me, "latest general", None, 0),
            msg(me, other, "latest booking", Some((booking, "Wedding Shoot")), 1),
            msg(other, me, "older general", None, 2),
            msg(me, other, "older booking", Some((booking, "Wedding Shoot")), 3),
        ];

        let conversations = group_conversations(me, messages);

        assert_eq!(conversations.len(), 2);
        let keys: HashSet<_> = conversations
            .iter()
            .map(|c| (c.other_user_id, c.booking_id))
            .collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn newest_message_wins_as_preview() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();

        let messages = vec![
            msg(other, me, "newest", None, 0),
            msg(me, other, "older", None, 5),
        ];

        let conversations = group_conversations(me, messages);
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].last_message, "newest");
    }

    #[test]
    fn booking_thread_uses_service_title_general_uses_placeholder() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let booking = Uuid::new_v4();

        let messages = vec![
            msg(other, me, "about the shoot", Some((booking, "Wedding Shoot")), 0),
            msg(other, me, "hello", None, 1),
        ];

        let conversations = group_conversations(me, messages);
        assert_eq!(conversations[0].thread_title, "Wedding Shoot");
        assert_eq!(conversations[1].thread_title, GENERAL_THREAD_TITLE);
    }

    #[test]
    fn counterparty_is_resolved_from_either_direction() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();

        let sent = group_conversations(me, vec![msg(me, other, "hi", None, 0)]);
        let received = group_conversations(me, vec![msg(other, me, "hi", None, 0)]);

        assert_eq!(sent[0].other_user_id, other);
        assert_eq!(received[0].other_user_id, other);
        assert_eq!(sent[0].other_username, "receiver");
        assert_eq!(received[0].other_username, "sender");
    }

    #[test]
    fn different_bookings_form_different_threads() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let booking_a = Uuid::new_v4();
        let booking_b = Uuid::new_v4();

        let messages = vec![
            msg(other, me, "a", Some((booking_a, "Shoot A")), 0),
            msg(other, me, "b", Some((booking_b, "Shoot B")), 1),
        ];

        let conversations = group_conversations(me, messages);
        assert_eq!(conversations.len(), 2);
    }
}
