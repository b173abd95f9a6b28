pub mod bookingdtos;
pub mod messagedtos;
pub mod reviewdtos;
pub mod servicedtos;
pub mod userdtos;
