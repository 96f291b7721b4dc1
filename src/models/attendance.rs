use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One student's attendance on one day, identified by (student_id, date)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    pub status: AttendanceStatus,
    /// Id of the teacher who took the register
    pub marked_by: String,
}

impl AttendanceRecord {
    pub fn new(
        student_id: impl Into<String>,
        date: impl Into<String>,
        status: AttendanceStatus,
        marked_by: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            date: date.into(),
            status,
            marked_by: marked_by.into(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }

    pub fn same_key(&self, other: &AttendanceRecord) -> bool {
        self.student_id == other.student_id && self.date == other.date
    }
}

/// Per-student attendance view, newest record first
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub percentage: u32,
    pub good_standing: bool,
    pub records: Vec<AttendanceRecord>,
}
