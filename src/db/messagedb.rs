use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::messagemodel::{Message, MessageWithParties};

#[async_trait]
pub trait MessageExt {
    async fn insert_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
        booking_id: Option<Uuid>,
    ) -> Result<Message, Error>;

    /// All messages the user is party to, newest first, joined with both
    /// parties' display data and the booking's service title. Input for the
    /// conversation fold.
    async fn get_user_messages(&self, user_id: Uuid) -> Result<Vec<MessageWithParties>, Error>;

    /// Messages between two users within one thread, oldest first. A set
    /// `booking_id` selects that booking's thread; None selects the general
    /// thread (booking_id IS NULL). Booking-scoped and general messages are
    /// disjoint sets.
    async fn get_thread_messages(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        booking_id: Option<Uuid>,
    ) -> Result<Vec<Message>, Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn insert_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
        booking_id: Option<Uuid>,
    ) -> Result<Message, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, content, booking_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, receiver_id, content, booking_id, created_at
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_messages(&self, user_id: Uuid) -> Result<Vec<MessageWithParties>, Error> {
        sqlx::query_as::<_, MessageWithParties>(
            r#"
            SELECT m.id, m.sender_id, m.receiver_id, m.content, m.booking_id,
                   su.username AS sender_name, su.profile_picture AS sender_picture,
                   ru.username AS receiver_name, ru.profile_picture AS receiver_picture,
                   s.title AS service_title, m.created_at
            FROM messages m
            JOIN users su ON m.sender_id = su.id
            JOIN users ru ON m.receiver_id = ru.id
            LEFT JOIN bookings b ON m.booking_id = b.id
            LEFT JOIN services s ON b.service_id = s.id
            WHERE m.sender_id = $1 OR m.receiver_id = $1
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_thread_messages(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
        booking_id: Option<Uuid>,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, receiver_id, content, booking_id, created_at
            FROM messages
            WHERE ((sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1))
              AND (($3::uuid IS NULL AND booking_id IS NULL) OR booking_id = $3)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(other_user_id)
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
    }
}
