//! Jobs Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::{
        jobs::{
            query::JobQuery,
            records::{JobChanges, JobDraft, JobId, JobRecord},
        },
        query::Slice,
    },
    store::StoreError,
};

/// Job storage. Every call is atomic on its own.
#[automock]
#[async_trait]
pub trait JobsRepository: Send + Sync {
    /// Run a compiled query, returning the window and the filtered total.
    async fn find_jobs(
        &self,
        query: &JobQuery,
    ) -> Result<Slice<JobRecord>, StoreError>;

    /// Fetch an active job.
    async fn get_job(
        &self,
        job: JobId,
    ) -> Result<Option<JobRecord>, StoreError>;

    /// Whether another active job already uses `title`, ignoring case.
    async fn job_title_taken(
        &self,
        title: &str,
        excluding: Option<JobId>,
    ) -> Result<bool, StoreError>;

    async fn insert_job(
        &self,
        draft: JobDraft,
    ) -> Result<JobRecord, StoreError>;

    /// Apply changes to an active job. `None` when no active row matched.
    async fn update_job(
        &self,
        job: JobId,
        changes: JobChanges,
    ) -> Result<Option<JobRecord>, StoreError>;

    /// Mark an active job inactive. `false` when no active row matched.
    async fn deactivate_job(
        &self,
        job: JobId,
        at: Timestamp,
    ) -> Result<bool, StoreError>;
}
