use crate::calc::attendance::{attendance_percentage, is_good_standing};
use crate::core::error::PortalError;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::portal::{PortalStore, ATTENDANCE_KEY};
use crate::validation::input::AttendanceSheet;
use tracing::debug;

impl PortalStore {
    pub fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, PortalError> {
        self.read_collection(ATTENDANCE_KEY)
    }

    pub fn list_attendance_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<AttendanceRecord>, PortalError> {
        Ok(self
            .list_attendance()?
            .into_iter()
            .filter(|r| r.student_id == student_id)
            .collect())
    }

    /// Replace stored records that share (student_id, date) with any record
    /// of `batch`, then append the batch as given. Pairs repeated inside
    /// the batch are kept as-is.
    pub fn save_attendance_batch(&self, batch: Vec<AttendanceRecord>) -> Result<(), PortalError> {
        let (replaced, total) = self.mutate(ATTENDANCE_KEY, |records: &mut Vec<AttendanceRecord>| {
            let before = records.len();
            records.retain(|existing| !batch.iter().any(|r| r.same_key(existing)));
            let replaced = before - records.len();
            records.extend(batch.iter().cloned());
            (replaced, records.len())
        })?;

        debug!(
            saved = batch.len(),
            replaced = replaced,
            total = total,
            "Attendance batch saved"
        );
        Ok(())
    }

    pub fn attendance_percentage(&self, student_id: &str) -> Result<u32, PortalError> {
        Ok(attendance_percentage(&self.list_attendance_for_student(student_id)?))
    }

    /// Take the register for a whole class: every student of the class gets
    /// a record, present when listed in the sheet and absent otherwise.
    /// Records are stamped with the session user.
    pub fn mark_class_attendance(
        &self,
        sheet: &AttendanceSheet,
    ) -> Result<Vec<AttendanceRecord>, PortalError> {
        sheet.validate()?;

        let marked_by = self.session_user_id()?;
        let batch: Vec<AttendanceRecord> = self
            .list_students_in_class(&sheet.class)?
            .into_iter()
            .map(|student| {
                let status = if sheet.present.contains(&student.id) {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };
                AttendanceRecord::new(student.id, sheet.date.as_str(), status, marked_by.as_str())
            })
            .collect();

        self.save_attendance_batch(batch.clone())?;
        Ok(batch)
    }

    pub fn attendance_summary(&self, student_id: &str) -> Result<AttendanceSummary, PortalError> {
        let mut records = self.list_attendance_for_student(student_id)?;
        let percentage = attendance_percentage(&records);
        let present = records.iter().filter(|r| r.is_present()).count();

        // ISO dates sort lexically
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(AttendanceSummary {
            present,
            absent: records.len() - present,
            percentage,
            good_standing: is_good_standing(percentage, self.good_standing_threshold()),
            records,
        })
    }
}
