pub mod attendance;
pub mod grade;
