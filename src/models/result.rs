use crate::calc::grade::{grade_for, rounded_percentage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade derived from a whole-number percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks for one student in one subject, identified by (student_id, subject)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub student_id: String,
    pub subject: String,
    pub marks: i64,
    pub max_marks: i64,
    pub uploaded_by: String,
    pub uploaded_at: String,
}

impl ResultRecord {
    pub fn same_key(&self, other: &ResultRecord) -> bool {
        self.student_id == other.student_id && self.subject == other.subject
    }

    pub fn percentage(&self) -> i64 {
        rounded_percentage(self.marks, self.max_marks)
    }

    pub fn grade(&self) -> Grade {
        grade_for(self.percentage())
    }
}

/// Totals over a set of results
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub total: i64,
    pub max_total: i64,
    pub percentage: i64,
    pub grade: Grade,
}
