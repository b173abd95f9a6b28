use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::bookingmodel::BookingStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Covers both a genuinely absent booking and one owned by another
    /// seller/customer; callers must not be able to tell the two apart.
    #[error("Booking not found or unauthorized")]
    BookingNotFound(Uuid),

    #[error("Service {0} not found")]
    ServiceNotFound(Uuid),

    #[error("Receiver not found")]
    ReceiverNotFound(Uuid),

    #[error("Notification not found")]
    NotificationNotFound(Uuid),

    #[error("Booking has already been {}", .1.to_str())]
    BookingAlreadyDecided(Uuid, BookingStatus),

    #[error("Only accepted bookings can be completed")]
    BookingNotCompletable(Uuid, BookingStatus),

    #[error("Payment status can only be updated on a completed booking")]
    PaymentBeforeCompletion(Uuid),

    #[error("Booking is already paid")]
    PaymentAlreadySettled(Uuid),

    #[error("Cannot review an incomplete booking")]
    IncompleteBookingReview(Uuid),

    #[error("You have already reviewed this booking")]
    DuplicateReview(Uuid),

    #[error("Sellers cannot create bookings")]
    SellerCannotBook,

    #[error("Sellers cannot message other sellers")]
    SellerToSellerMessage,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::BookingNotFound(_)
            | ServiceError::ServiceNotFound(_)
            | ServiceError::ReceiverNotFound(_)
            | ServiceError::NotificationNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::BookingAlreadyDecided(_, _)
            | ServiceError::BookingNotCompletable(_, _)
            | ServiceError::PaymentBeforeCompletion(_)
            | ServiceError::PaymentAlreadySettled(_)
            | ServiceError::IncompleteBookingReview(_)
            | ServiceError::DuplicateReview(_)
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::SellerCannotBook | ServiceError::SellerToSellerMessage => {
                HttpError::forbidden(error.to_string())
            }

            // Never leak driver detail to the caller.
            ServiceError::Database(_) => {
                HttpError::server_error("Server error".to_string())
            }
        }
    }
}
