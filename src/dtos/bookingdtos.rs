use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingDto {
    pub service_id: Uuid,

    #[validate(length(min = 1, message = "Booking date is required"))]
    pub booking_date: String,

    #[validate(length(min = 1, message = "Contact info is required"))]
    pub contact_info: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

/// Status arrives as a plain string so an unknown value surfaces as a 400
/// from the lifecycle engine rather than a deserialization failure.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusDto {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentStatusDto {
    #[validate(length(min = 1, message = "Payment status is required"))]
    pub payment_status: String,
}
