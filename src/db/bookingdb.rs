use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::bookingmodel::{Booking, BookingListing, BookingStatus, PaymentStatus};

/// Every mutation here is a single UPDATE whose predicate carries the
/// ownership check (booking -> service -> seller) and the expected current
/// state, so a concurrent accept/reject on the same booking cannot both
/// succeed and an unauthorized seller observes the same "no row" result as a
/// missing booking.
#[async_trait]
pub trait BookingExt {
    async fn create_booking(
        &self,
        customer_id: Uuid,
        service_id: Uuid,
        booking_date: String,
        contact_info: String,
        location: String,
    ) -> Result<Booking, Error>;

    async fn get_customer_bookings(&self, customer_id: Uuid)
        -> Result<Vec<BookingListing>, Error>;

    async fn get_seller_bookings(&self, seller_id: Uuid) -> Result<Vec<BookingListing>, Error>;

    /// Read scoped to the owning seller; None for both "absent" and "not
    /// yours".
    async fn get_booking_for_seller(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
    ) -> Result<Option<Booking>, Error>;

    /// Read scoped to the owning customer.
    async fn get_booking_for_customer(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Booking>, Error>;

    /// Accept or reject a still-pending booking. None when the booking is
    /// absent, not owned by `seller_id`, or no longer pending.
    async fn decide_booking(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, Error>;

    /// Flip `is_completed` on an accepted, not-yet-completed booking.
    async fn complete_booking(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
    ) -> Result<Option<Booking>, Error>;

    /// Move payment off `pending` on a completed booking.
    async fn set_payment_status(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>, Error>;
}

const BOOKING_COLUMNS: &str = "id, customer_id, service_id, booking_date, contact_info, \
                               location, status, payment_status, is_completed, created_at";

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking(
        &self,
        customer_id: Uuid,
        service_id: Uuid,
        booking_date: String,
        contact_info: String,
        location: String,
    ) -> Result<Booking, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (customer_id, service_id, booking_date, contact_info, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(customer_id)
        .bind(service_id)
        .bind(booking_date)
        .bind(contact_info)
        .bind(location)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_customer_bookings(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>(
            r#"
            SELECT b.id, b.customer_id, b.service_id, b.booking_date, b.contact_info,
                   b.location, b.status, b.payment_status, b.is_completed,
                   s.title AS service_title, u.username AS counterparty_name, b.created_at
            FROM bookings b
            JOIN services s ON b.service_id = s.id
            JOIN users u ON s.seller_id = u.id
            WHERE b.customer_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_seller_bookings(&self, seller_id: Uuid) -> Result<Vec<BookingListing>, Error> {
        sqlx::query_as::<_, BookingListing>(
            r#"
            SELECT b.id, b.customer_id, b.service_id, b.booking_date, b.contact_info,
                   b.location, b.status, b.payment_status, b.is_completed,
                   s.title AS service_title, u.username AS counterparty_name, b.created_at
            FROM bookings b
            JOIN services s ON b.service_id = s.id
            JOIN users u ON b.customer_id = u.id
            WHERE s.seller_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_booking_for_seller(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.id, b.customer_id, b.service_id, b.booking_date, b.contact_info,
                   b.location, b.status, b.payment_status, b.is_completed, b.created_at
            FROM bookings b
            JOIN services s ON b.service_id = s.id
            WHERE b.id = $1 AND s.seller_id = $2
            "#,
        )
        .bind(booking_id)
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_booking_for_customer(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE id = $1 AND customer_id = $2
            "#
        ))
        .bind(booking_id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn decide_booking(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings b
            SET status = $3
            WHERE b.id = $1
              AND b.status = 'pending'::booking_status
              AND EXISTS (
                  SELECT 1 FROM services s
                  WHERE s.id = b.service_id AND s.seller_id = $2
              )
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(seller_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn complete_booking(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings b
            SET is_completed = TRUE
            WHERE b.id = $1
              AND b.status = 'accepted'::booking_status
              AND b.is_completed = FALSE
              AND EXISTS (
                  SELECT 1 FROM services s
                  WHERE s.id = b.service_id AND s.seller_id = $2
              )
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_payment_status(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<Option<Booking>, Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings b
            SET payment_status = $3
            WHERE b.id = $1
              AND b.is_completed = TRUE
              AND b.payment_status = 'pending'::payment_status
              AND EXISTS (
                  SELECT 1 FROM services s
                  WHERE s.id = b.service_id AND s.seller_id = $2
              )
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(seller_id)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await
    }
}
