use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::reviewmodel::{Review, ReviewWithReviewer};

#[async_trait]
pub trait ReviewExt {
    async fn get_review_by_booking(&self, booking_id: Uuid) -> Result<Option<Review>, Error>;

    async fn insert_review(
        &self,
        booking_id: Uuid,
        rating: i32,
        comment: String,
    ) -> Result<Review, Error>;

    /// Reviews of all bookings of a service, joined with the reviewing
    /// customer's public identity, newest first.
    async fn get_service_reviews(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<ReviewWithReviewer>, Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn get_review_by_booking(&self, booking_id: Uuid) -> Result<Option<Review>, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, booking_id, rating, comment, created_at
            FROM reviews
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_review(
        &self,
        booking_id: Uuid,
        rating: i32,
        comment: String,
    ) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (booking_id, rating, comment)
            VALUES ($1, $2, $3)
            RETURNING id, booking_id, rating, comment, created_at
            "#,
        )
        .bind(booking_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_service_reviews(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<ReviewWithReviewer>, Error> {
        sqlx::query_as::<_, ReviewWithReviewer>(
            r#"
            SELECT r.id, r.booking_id, r.rating, r.comment,
                   u.username AS reviewer_name, u.profile_picture AS reviewer_picture,
                   r.created_at
            FROM reviews r
            JOIN bookings b ON r.booking_id = b.id
            JOIN users u ON b.customer_id = u.id
            WHERE b.service_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
    }
}
