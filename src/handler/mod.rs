pub mod auth;
pub mod bookings;
pub mod messages;
pub mod notifications;
pub mod reviews;
pub mod services;
pub mod users;
