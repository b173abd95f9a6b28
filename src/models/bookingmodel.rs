use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BookingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// A seller's decision on a pending booking. `pending` itself is not a
    /// valid decision, only `accepted` or `rejected`.
    pub fn from_decision(value: &str) -> Option<BookingStatus> {
        match value {
            "accepted" => Some(BookingStatus::Accepted),
            "rejected" => Some(BookingStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn from_str(value: &str) -> Option<PaymentStatus> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

/// Invariants enforced by the lifecycle engine: `is_completed` implies
/// `status == accepted`, and `payment_status == paid` implies `is_completed`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub booking_date: String,
    pub contact_info: String,
    pub location: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Booking joined with its service title and counterparty name, for the
/// customer and seller dashboards.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct BookingListing {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub booking_date: String,
    pub contact_info: String,
    pub location: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub is_completed: bool,
    pub service_title: String,
    pub counterparty_name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_accepted_and_rejected_only() {
        assert_eq!(
            BookingStatus::from_decision("accepted"),
            Some(BookingStatus::Accepted)
        );
        assert_eq!(
            BookingStatus::from_decision("rejected"),
            Some(BookingStatus::Rejected)
        );
        assert_eq!(BookingStatus::from_decision("pending"), None);
        assert_eq!(BookingStatus::from_decision("completed"), None);
        assert_eq!(BookingStatus::from_decision(""), None);
    }

    #[test]
    fn payment_status_parses_known_values_only() {
        assert_eq!(PaymentStatus::from_str("paid"), Some(PaymentStatus::Paid));
        assert_eq!(
            PaymentStatus::from_str("pending"),
            Some(PaymentStatus::Pending)
        );
        assert_eq!(PaymentStatus::from_str("refunded"), None);
    }
}
