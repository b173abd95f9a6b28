use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{bookingdb::BookingExt, db::DBClient, reviewdb::ReviewExt},
    models::reviewmodel::{Review, ReviewWithReviewer},
    service::error::ServiceError,
};

/// Gatekeeper for reviews: one per booking, written by the booking's
/// customer, only after completion.
#[derive(Debug, Clone)]
pub struct ReviewService {
    db_client: Arc<DBClient>,
}

impl ReviewService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn add_review(
        &self,
        customer_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: String,
    ) -> Result<Review, ServiceError> {
        // Scoped to id + customer in one query; a non-owner sees "not found".
        let booking = self
            .db_client
            .get_booking_for_customer(booking_id, customer_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if !booking.is_completed {
            return Err(ServiceError::IncompleteBookingReview(booking_id));
        }

        if self
            .db_client
            .get_review_by_booking(booking_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::DuplicateReview(booking_id));
        }

        match self
            .db_client
            .insert_review(booking_id, rating, comment)
            .await
        {
            Ok(review) => Ok(review),
            // Two concurrent submissions can both pass the existence check;
            // the unique index on booking_id settles the race.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ServiceError::DuplicateReview(booking_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn service_reviews(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<ReviewWithReviewer>, ServiceError> {
        let reviews = self.db_client.get_service_reviews(service_id).await?;
        Ok(reviews)
    }
}

/// Read-time aggregate over a review set; nothing is stored.
pub fn rating_summary(reviews: &[ReviewWithReviewer]) -> (Option<f64>, usize) {
    if reviews.is_empty() {
        return (None, 0);
    }

    let total: i64 = reviews.iter().map(|r| r.rating as i64).sum();
    let average = total as f64 / reviews.len() as f64;
    (Some(average), reviews.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(rating: i32) -> ReviewWithReviewer {
        ReviewWithReviewer {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            rating,
            comment: "Great!".to_string(),
            reviewer_name: "customer".to_string(),
            reviewer_picture: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_review_set_has_no_average() {
        assert_eq!(rating_summary(&[]), (None, 0));
    }

    #[test]
    fn average_is_computed_over_all_ratings() {
        let reviews = vec![review(5), review(4), review(3)];
        let (average, count) = rating_summary(&reviews);
        assert_eq!(count, 3);
        assert_eq!(average, Some(4.0));
    }
}
