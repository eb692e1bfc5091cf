//! Job Data

use jiff::Timestamp;

use crate::domain::{
    jobs::records::{JobChanges, JobDraft, JobId},
    validation::{Description, RequiredText, ValidationErrors, Validator, positive_id, trim_optional},
};

const TITLE: RequiredText = RequiredText {
    field: "title",
    max_chars: 100,
    required: "Job title is required",
    too_long: "Job title cannot exceed 100 characters",
};

/// New Job Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub description: Option<String>,
}

impl NewJob {
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_owned(),
            description: trim_optional(self.description),
        }
    }

    /// New jobs always start active, created and updated now.
    pub(crate) fn into_draft(self, now: Timestamp) -> JobDraft {
        JobDraft {
            title: self.title,
            description: self.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn into_changes(self, now: Timestamp) -> JobChanges {
        JobChanges {
            title: self.title,
            description: self.description,
            updated_at: now,
        }
    }
}

/// Job Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobUpdate {
    pub id: JobId,
    pub job: NewJob,
}

impl JobUpdate {
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            id: self.id,
            job: self.job.normalized(),
        }
    }
}

/// Rules for creating a job.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewJobValidator;

impl Validator<NewJob> for NewJobValidator {
    fn check(&self, value: &NewJob, errors: &mut ValidationErrors) {
        TITLE.check(&value.title, errors);
        Description.check(&value.description, errors);
    }
}

/// Rules for updating a job: the create rules plus a valid id.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobUpdateValidator;

impl Validator<JobUpdate> for JobUpdateValidator {
    fn check(&self, value: &JobUpdate, errors: &mut ValidationErrors) {
        NewJobValidator.check(&value.job, errors);
        positive_id(errors, "id", value.id, "Invalid job ID");
    }
}
