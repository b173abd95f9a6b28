pub mod booking_service;
pub mod error;
pub mod message_service;
pub mod notification_service;
pub mod review_service;
