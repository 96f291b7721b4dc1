pub mod attendance;
pub mod dashboard;
pub mod result;
pub mod user;
