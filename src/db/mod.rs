pub mod bookingdb;
pub mod db;
pub mod messagedb;
pub mod notificationdb;
pub mod reviewdb;
pub mod servicedb;
pub mod userdb;
