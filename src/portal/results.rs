use crate::calc::grade::aggregate;
use crate::core::error::PortalError;
use crate::models::result::{Aggregate, ResultRecord};
use crate::portal::{PortalStore, RESULTS_KEY};
use crate::utils::time::today_iso;
use crate::validation::input::ResultUpload;
use tracing::debug;

impl PortalStore {
    pub fn list_results(&self) -> Result<Vec<ResultRecord>, PortalError> {
        self.read_collection(RESULTS_KEY)
    }

    pub fn list_results_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<ResultRecord>, PortalError> {
        Ok(self
            .list_results()?
            .into_iter()
            .filter(|r| r.student_id == student_id)
            .collect())
    }

    /// Upsert by (student_id, subject): the first match is replaced in
    /// place, otherwise the record is appended
    pub fn save_result(&self, record: ResultRecord) -> Result<(), PortalError> {
        let replaced = self.mutate(RESULTS_KEY, |results: &mut Vec<ResultRecord>| {
            match results.iter().position(|r| r.same_key(&record)) {
                Some(idx) => {
                    results[idx] = record.clone();
                    true
                }
                None => {
                    results.push(record.clone());
                    false
                }
            }
        })?;

        debug!(
            student_id = %record.student_id,
            subject = %record.subject,
            replaced = replaced,
            "Result saved"
        );
        Ok(())
    }

    /// Checked entry of marks for an existing student, stamped with the
    /// session user and today's date
    pub fn upload_result(&self, upload: &ResultUpload) -> Result<ResultRecord, PortalError> {
        upload.validate()?;

        let is_student = self
            .get_user_by_id(&upload.student_id)?
            .is_some_and(|u| u.is_student());
        if !is_student {
            return Err(PortalError::NotFound(format!("student {}", upload.student_id)));
        }

        let record = ResultRecord {
            student_id: upload.student_id.clone(),
            subject: upload.subject.trim().to_string(),
            marks: upload.marks,
            max_marks: upload.max_marks,
            uploaded_by: self.session_user_id()?,
            uploaded_at: today_iso(),
        };

        self.save_result(record.clone())?;
        Ok(record)
    }

    pub fn student_aggregate(&self, student_id: &str) -> Result<Aggregate, PortalError> {
        Ok(aggregate(&self.list_results_for_student(student_id)?))
    }
}
