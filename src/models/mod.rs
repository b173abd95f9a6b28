pub mod bookingmodel;
pub mod messagemodel;
pub mod notificationmodel;
pub mod reviewmodel;
pub mod servicemodel;
pub mod usermodel;
