use crate::core::error::ValidationError;
use crate::models::user::{NewUser, Role, User};
use crate::utils::time::parse_iso_date;
use serde::Deserialize;
use std::collections::HashSet;

/// Marks entered for one student in one subject
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultUpload {
    pub student_id: String,
    pub subject: String,
    pub marks: i64,
    /// Defaults to 100 like the entry form
    #[serde(default = "default_max_marks")]
    pub max_marks: i64,
}

fn default_max_marks() -> i64 {
    100
}

/// A register taken for a whole class on one day
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSheet {
    pub class: String,
    pub date: String,
    /// Students of the class not listed here are marked absent
    #[serde(default)]
    pub present: HashSet<String>,
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingParameter(field.to_string()));
    }
    Ok(())
}

/// Keep a blank-trimmed optional only when `keep` holds
fn keep_if(value: Option<String>, keep: bool) -> Option<String> {
    if !keep {
        return None;
    }
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check a registration against the existing directory and normalize it:
/// `class` survives only for students and `subject` only for teachers.
pub fn validate_new_user(user: NewUser, existing: &[User]) -> Result<NewUser, ValidationError> {
    require("name", &user.name)?;
    require("username", &user.username)?;
    require("password", &user.password)?;

    if existing.iter().any(|u| u.username == user.username) {
        return Err(ValidationError::DuplicateUsername(user.username));
    }

    let is_student = user.role == Role::Student;
    let is_teacher = user.role == Role::Teacher;

    Ok(NewUser {
        class: keep_if(user.class, is_student),
        subject: keep_if(user.subject, is_teacher),
        ..user
    })
}

/// The root administrator can never be removed through the boundary
pub fn guard_user_removal(id: &str, root_admin_id: &str) -> Result<(), ValidationError> {
    if id == root_admin_id {
        return Err(ValidationError::ProtectedUser(id.to_string()));
    }
    Ok(())
}

pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    require("date", date)?;
    if parse_iso_date(date).is_none() {
        return Err(ValidationError::InvalidFormat(format!(
            "date must be YYYY-MM-DD, got {:?}",
            date
        )));
    }
    Ok(())
}

impl ResultUpload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("studentId", &self.student_id)?;
        require("subject", &self.subject)?;

        if self.max_marks <= 0 {
            return Err(ValidationError::OutOfRange(
                "maxMarks must be greater than 0".to_string(),
            ));
        }

        if self.marks < 0 {
            return Err(ValidationError::OutOfRange(format!(
                "marks ({}) cannot be negative",
                self.marks
            )));
        }

        if self.marks > self.max_marks {
            return Err(ValidationError::OutOfRange(format!(
                "marks ({}) cannot exceed maxMarks ({})",
                self.marks, self.max_marks
            )));
        }

        Ok(())
    }
}

impl AttendanceSheet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("class", &self.class)?;
        validate_date(&self.date)
    }
}
