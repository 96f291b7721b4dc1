use crate::models::result::Aggregate;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub students: usize,
    pub teachers: usize,
    /// Attendance records dated today, from any teacher
    pub attendance_today: usize,
    pub results: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherOverview {
    pub students: usize,
    pub attendance_today: usize,
    pub results_uploaded: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    pub attendance_percentage: u32,
    pub good_standing: bool,
    pub aggregate: Aggregate,
    pub subjects: usize,
}
