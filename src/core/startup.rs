use tracing::info;

use crate::core::error::PortalError;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::result::ResultRecord;
use crate::models::user::{NewUser, Role, User};
use crate::portal::{PortalStore, ATTENDANCE_KEY, RESULTS_KEY, USERS_KEY};

/// Which collections `ensure_seeded` wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: bool,
    pub attendance: bool,
    pub results: bool,
}

impl SeedReport {
    pub fn any(&self) -> bool {
        self.users || self.attendance || self.results
    }
}

/// Write the demo dataset into every collection whose key is absent.
/// A collection that exists but is empty is left alone.
pub fn ensure_seeded(portal: &PortalStore) -> Result<SeedReport, PortalError> {
    let _guard = portal.lock_writes();
    let mut report = SeedReport::default();

    if !portal.has_blob(USERS_KEY)? {
        portal.write_value(USERS_KEY, &demo_users())?;
        report.users = true;
    }

    if !portal.has_blob(ATTENDANCE_KEY)? {
        portal.write_value(ATTENDANCE_KEY, &demo_attendance())?;
        report.attendance = true;
    }

    if !portal.has_blob(RESULTS_KEY)? {
        portal.write_value(RESULTS_KEY, &demo_results())?;
        report.results = true;
    }

    if report.any() {
        info!(
            users = report.users,
            attendance = report.attendance,
            results = report.results,
            "Seeded demo data"
        );
    }

    Ok(report)
}

fn user(id: &str, fields: NewUser) -> User {
    fields.into_user(id.to_string())
}

pub fn demo_users() -> Vec<User> {
    vec![
        user("1", NewUser::new("admin", "admin123", Role::Admin, "Administrator")),
        user(
            "2",
            NewUser::new("teacher1", "teacher123", Role::Teacher, "John Smith")
                .with_subject("Mathematics"),
        ),
        user(
            "3",
            NewUser::new("teacher2", "teacher123", Role::Teacher, "Sarah Johnson")
                .with_subject("Science"),
        ),
        user(
            "4",
            NewUser::new("student1", "student123", Role::Student, "Alice Brown").with_class("10-A"),
        ),
        user(
            "5",
            NewUser::new("student2", "student123", Role::Student, "Bob Wilson").with_class("10-A"),
        ),
        user(
            "6",
            NewUser::new("student3", "student123", Role::Student, "Carol Davis").with_class("10-B"),
        ),
        user(
            "7",
            NewUser::new("student4", "student123", Role::Student, "David Lee").with_class("10-B"),
        ),
        user(
            "8",
            NewUser::new("student5", "student123", Role::Student, "Emma White").with_class("10-A"),
        ),
    ]
}

pub fn demo_attendance() -> Vec<AttendanceRecord> {
    use AttendanceStatus::{Absent, Present};

    [
        ("4", "2024-01-15", Present),
        ("5", "2024-01-15", Present),
        ("6", "2024-01-15", Absent),
        ("4", "2024-01-16", Present),
        ("5", "2024-01-16", Absent),
        ("6", "2024-01-16", Present),
    ]
    .into_iter()
    .map(|(student_id, date, status)| AttendanceRecord::new(student_id, date, status, "2"))
    .collect()
}

pub fn demo_results() -> Vec<ResultRecord> {
    [
        ("4", "Mathematics", 85, "2"),
        ("4", "Science", 78, "3"),
        ("5", "Mathematics", 92, "2"),
        ("5", "Science", 88, "3"),
    ]
    .into_iter()
    .map(|(student_id, subject, marks, uploaded_by)| ResultRecord {
        student_id: student_id.to_string(),
        subject: subject.to_string(),
        marks,
        max_marks: 100,
        uploaded_by: uploaded_by.to_string(),
        uploaded_at: "2024-01-10".to_string(),
    })
    .collect()
}
