use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{bookingdb::BookingExt, db::DBClient, servicedb::ServiceExt},
    models::{
        bookingmodel::{Booking, BookingListing, BookingStatus, PaymentStatus},
        notificationmodel::NotificationPayload,
        usermodel::{User, UserRole},
    },
    service::{error::ServiceError, notification_service::NotificationService},
};

/// The booking state machine:
///
/// pending --accept--> accepted --complete--> accepted+completed --pay--> paid
/// pending --reject--> rejected (terminal)
///
/// Rejected and paid+completed are terminal. Ownership verification and the
/// mutation happen in one guarded UPDATE (see `BookingExt`); when the update
/// misses, an ownership-scoped re-read tells a decided/completed booking
/// apart from one the caller may not see at all.
#[derive(Debug, Clone)]
pub struct BookingService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl BookingService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn create_booking(
        &self,
        customer: &User,
        service_id: Uuid,
        booking_date: String,
        contact_info: String,
        location: String,
    ) -> Result<Booking, ServiceError> {
        if customer.role == UserRole::Seller {
            return Err(ServiceError::SellerCannotBook);
        }

        let service = self
            .db_client
            .get_service_by_id(service_id)
            .await?
            .ok_or(ServiceError::ServiceNotFound(service_id))?;

        let booking = self
            .db_client
            .create_booking(customer.id, service_id, booking_date, contact_info, location)
            .await?;

        // Best effort: a lost notification must not revert the booking, but
        // it must leave a trace for operators.
        if let Err(e) = self
            .notification_service
            .notify(
                service.seller_id,
                NotificationPayload::BookingRequest {
                    booking_id: booking.id,
                },
                format!(
                    "New booking request from {} for '{}'",
                    customer.username, service.title
                ),
            )
            .await
        {
            tracing::error!(
                "Failed to dispatch booking_request notification for booking {}: {}",
                booking.id,
                e
            );
        }

        Ok(booking)
    }

    pub async fn customer_bookings(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<BookingListing>, ServiceError> {
        let bookings = self.db_client.get_customer_bookings(customer_id).await?;
        Ok(bookings)
    }

    pub async fn seller_bookings(
        &self,
        seller_id: Uuid,
    ) -> Result<Vec<BookingListing>, ServiceError> {
        let bookings = self.db_client.get_seller_bookings(seller_id).await?;
        Ok(bookings)
    }

    /// Accept or reject a pending booking on behalf of the owning seller.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
        status: &str,
    ) -> Result<Booking, ServiceError> {
        let status = BookingStatus::from_decision(status)
            .ok_or_else(|| ServiceError::Validation("Invalid status".to_string()))?;

        let updated = self
            .db_client
            .decide_booking(booking_id, seller_id, status)
            .await?;

        let booking = match updated {
            Some(booking) => booking,
            None => {
                let existing = self
                    .db_client
                    .get_booking_for_seller(booking_id, seller_id)
                    .await?;
                return Err(decision_miss(booking_id, existing));
            }
        };

        if let Err(e) = self
            .notification_service
            .notify(
                booking.customer_id,
                NotificationPayload::BookingUpdate {
                    booking_id: booking.id,
                },
                format!("Your booking has been {}", booking.status.to_str()),
            )
            .await
        {
            tracing::error!(
                "Failed to dispatch booking_update notification for booking {}: {}",
                booking.id,
                e
            );
        }

        Ok(booking)
    }

    /// Mark an accepted booking as completed. Calling it again on an already
    /// completed booking is a no-op and does not notify a second time.
    pub async fn complete_booking(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
    ) -> Result<Booking, ServiceError> {
        let updated = self
            .db_client
            .complete_booking(booking_id, seller_id)
            .await?;

        let booking = match updated {
            Some(booking) => booking,
            None => {
                let existing = self
                    .db_client
                    .get_booking_for_seller(booking_id, seller_id)
                    .await?;
                return match completion_miss(booking_id, existing) {
                    Ok(already_completed) => Ok(already_completed),
                    Err(e) => Err(e),
                };
            }
        };

        if let Err(e) = self
            .notification_service
            .notify(
                booking.customer_id,
                NotificationPayload::BookingUpdate {
                    booking_id: booking.id,
                },
                "Your booking has been marked as completed".to_string(),
            )
            .await
        {
            tracing::error!(
                "Failed to dispatch booking_update notification for booking {}: {}",
                booking.id,
                e
            );
        }

        Ok(booking)
    }

    pub async fn update_payment_status(
        &self,
        booking_id: Uuid,
        seller_id: Uuid,
        payment_status: &str,
    ) -> Result<Booking, ServiceError> {
        let payment_status = PaymentStatus::from_str(payment_status)
            .ok_or_else(|| ServiceError::Validation("Invalid payment status".to_string()))?;

        let updated = self
            .db_client
            .set_payment_status(booking_id, seller_id, payment_status)
            .await?;

        match updated {
            Some(booking) => Ok(booking),
            None => {
                let existing = self
                    .db_client
                    .get_booking_for_seller(booking_id, seller_id)
                    .await?;
                Err(payment_miss(booking_id, existing))
            }
        }
    }
}

/// The guarded accept/reject UPDATE matched no row. Decide why.
fn decision_miss(booking_id: Uuid, existing: Option<Booking>) -> ServiceError {
    match existing {
        Some(booking) => ServiceError::BookingAlreadyDecided(booking.id, booking.status),
        None => ServiceError::BookingNotFound(booking_id),
    }
}

/// The guarded completion UPDATE matched no row. An already completed
/// booking is returned as-is (idempotent repeat); anything else is an error.
fn completion_miss(booking_id: Uuid, existing: Option<Booking>) -> Result<Booking, ServiceError> {
    match existing {
        Some(booking) if booking.is_completed => Ok(booking),
        Some(booking) => Err(ServiceError::BookingNotCompletable(booking.id, booking.status)),
        None => Err(ServiceError::BookingNotFound(booking_id)),
    }
}

/// The guarded payment UPDATE matched no row.
fn payment_miss(booking_id: Uuid, existing: Option<Booking>) -> ServiceError {
    match existing {
        Some(booking) if !booking.is_completed => ServiceError::PaymentBeforeCompletion(booking.id),
        Some(booking) => ServiceError::PaymentAlreadySettled(booking.id),
        None => ServiceError::BookingNotFound(booking_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(status: BookingStatus, is_completed: bool, payment: PaymentStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            booking_date: "2025-12-25".to_string(),
            contact_info: "0123456789".to_string(),
            location: "Dhaka".to_string(),
            status,
            payment_status: payment,
            is_completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn decision_miss_masks_unauthorized_as_not_found() {
        let id = Uuid::new_v4();
        assert!(matches!(
            decision_miss(id, None),
            ServiceError::BookingNotFound(found) if found == id
        ));
    }

    #[test]
    fn decision_miss_on_decided_booking_is_rejected() {
        let b = booking(BookingStatus::Accepted, false, PaymentStatus::Pending);
        assert!(matches!(
            decision_miss(b.id, Some(b)),
            ServiceError::BookingAlreadyDecided(_, BookingStatus::Accepted)
        ));
    }

    #[test]
    fn repeated_completion_is_an_idempotent_no_op() {
        let b = booking(BookingStatus::Accepted, true, PaymentStatus::Pending);
        let returned = completion_miss(b.id, Some(b.clone())).unwrap();
        assert_eq!(returned.id, b.id);
        assert!(returned.is_completed);
    }

    #[test]
    fn pending_booking_cannot_be_completed() {
        let b = booking(BookingStatus::Pending, false, PaymentStatus::Pending);
        assert!(matches!(
            completion_miss(b.id, Some(b)),
            Err(ServiceError::BookingNotCompletable(_, BookingStatus::Pending))
        ));
    }

    #[test]
    fn rejected_booking_cannot_be_completed() {
        let b = booking(BookingStatus::Rejected, false, PaymentStatus::Pending);
        assert!(matches!(
            completion_miss(b.id, Some(b)),
            Err(ServiceError::BookingNotCompletable(_, BookingStatus::Rejected))
        ));
    }

    #[test]
    fn completion_miss_masks_unauthorized_as_not_found() {
        assert!(matches!(
            completion_miss(Uuid::new_v4(), None),
            Err(ServiceError::BookingNotFound(_))
        ));
    }

    #[test]
    fn payment_requires_completion_first() {
        let b = booking(BookingStatus::Accepted, false, PaymentStatus::Pending);
        assert!(matches!(
            payment_miss(b.id, Some(b)),
            ServiceError::PaymentBeforeCompletion(_)
        ));
    }

    #[test]
    fn paid_booking_is_terminal() {
        let b = booking(BookingStatus::Accepted, true, PaymentStatus::Paid);
        assert!(matches!(
            payment_miss(b.id, Some(b)),
            ServiceError::PaymentAlreadySettled(_)
        ));
    }
}
