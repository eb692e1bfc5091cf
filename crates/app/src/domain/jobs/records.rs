//! Job Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Job Id
pub type JobId = TypedId<JobRecord>;

/// Job Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values stored for a new job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by an update. The activity flag and creation time are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobChanges {
    pub title: String,
    pub description: Option<String>,
    pub updated_at: Timestamp,
}
