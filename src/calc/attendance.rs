use crate::calc::grade::rounded_percentage;
use crate::models::attendance::AttendanceRecord;

/// Present records over all records, as a rounded whole percentage.
/// A student with no records scores 0.
pub fn attendance_percentage(records: &[AttendanceRecord]) -> u32 {
    let present = records.iter().filter(|r| r.is_present()).count();
    rounded_percentage(present as i64, records.len() as i64) as u32
}

pub fn is_good_standing(percentage: u32, threshold: u32) -> bool {
    percentage >= threshold
}
