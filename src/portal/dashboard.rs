use crate::calc::attendance::is_good_standing;
use crate::calc::grade::aggregate;
use crate::core::error::PortalError;
use crate::models::dashboard::{AdminOverview, StudentOverview, TeacherOverview};
use crate::models::user::Role;
use crate::portal::PortalStore;

impl PortalStore {
    /// `today` is an ISO date supplied by the caller
    pub fn admin_overview(&self, today: &str) -> Result<AdminOverview, PortalError> {
        let users = self.list_users()?;

        Ok(AdminOverview {
            students: users.iter().filter(|u| u.role == Role::Student).count(),
            teachers: users.iter().filter(|u| u.role == Role::Teacher).count(),
            attendance_today: self
                .list_attendance()?
                .iter()
                .filter(|a| a.date == today)
                .count(),
            results: self.list_results()?.len(),
        })
    }

    pub fn teacher_overview(
        &self,
        teacher_id: &str,
        today: &str,
    ) -> Result<TeacherOverview, PortalError> {
        Ok(TeacherOverview {
            students: self.list_users_by_role(Role::Student)?.len(),
            attendance_today: self
                .list_attendance()?
                .iter()
                .filter(|a| a.marked_by == teacher_id && a.date == today)
                .count(),
            results_uploaded: self
                .list_results()?
                .iter()
                .filter(|r| r.uploaded_by == teacher_id)
                .count(),
        })
    }

    pub fn student_overview(&self, student_id: &str) -> Result<StudentOverview, PortalError> {
        let attendance_percentage = self.attendance_percentage(student_id)?;
        let results = self.list_results_for_student(student_id)?;

        Ok(StudentOverview {
            attendance_percentage,
            good_standing: is_good_standing(attendance_percentage, self.good_standing_threshold()),
            aggregate: aggregate(&results),
            subjects: results.len(),
        })
    }
}
