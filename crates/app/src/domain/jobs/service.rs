//! Jobs service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    clock::Clock,
    domain::{
        jobs::{
            data::{JobUpdate, JobUpdateValidator, NewJob, NewJobValidator},
            errors::JobsServiceError,
            query::compile,
            records::{JobId, JobRecord},
            repository::JobsRepository,
        },
        employees::EmployeesRepository,
        query::{PagedResult, QueryParameters},
        validation::Validator,
    },
};

pub struct StoreJobsService {
    jobs: Arc<dyn JobsRepository>,
    employees: Arc<dyn EmployeesRepository>,
    clock: Arc<dyn Clock>,
}

impl StoreJobsService {
    #[must_use]
    pub fn new(
        jobs: Arc<dyn JobsRepository>,
        employees: Arc<dyn EmployeesRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            jobs,
            employees,
            clock,
        }
    }
}

impl Debug for StoreJobsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreJobsService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl JobsService for StoreJobsService {
    #[tracing::instrument(
        name = "jobs.service.list_jobs",
        skip(self),
        fields(page_number = params.page_number, page_size = params.page_size),
        err
    )]
    async fn list_jobs(
        &self,
        params: QueryParameters,
    ) -> Result<PagedResult<JobRecord>, JobsServiceError> {
        let page = params.page()?;
        let query = compile(&params, page.window());

        let slice = self.jobs.find_jobs(&query).await?;

        Ok(PagedResult::new(slice, page))
    }

    #[tracing::instrument(
        name = "jobs.service.get_job",
        skip(self),
        fields(job_id = %job),
        err
    )]
    async fn get_job(
        &self,
        job: JobId,
    ) -> Result<Option<JobRecord>, JobsServiceError> {
        Ok(self.jobs.get_job(job).await?)
    }

    #[tracing::instrument(
        name = "jobs.service.create_job",
        skip(self, job),
        err
    )]
    async fn create_job(
        &self,
        job: NewJob,
    ) -> Result<JobRecord, JobsServiceError> {
        let job = job.normalized();

        NewJobValidator.validate(&job)?;

        if self
            .jobs
            .job_title_taken(&job.title, None)
            .await?
        {
            return Err(JobsServiceError::AlreadyExists);
        }

        let created = self
            .jobs
            .insert_job(job.into_draft(self.clock.now()))
            .await?;

        info!(job_id = %created.id, "created job");

        Ok(created)
    }

    #[tracing::instrument(
        name = "jobs.service.update_job",
        skip(self, update),
        fields(job_id = %update.id),
        err
    )]
    async fn update_job(
        &self,
        update: JobUpdate,
    ) -> Result<JobRecord, JobsServiceError> {
        let update = update.normalized();

        JobUpdateValidator.validate(&update)?;

        if self.jobs.get_job(update.id).await?.is_none() {
            return Err(JobsServiceError::NotFound);
        }

        if self
            .jobs
            .job_title_taken(&update.job.title, Some(update.id))
            .await?
        {
            return Err(JobsServiceError::AlreadyExists);
        }

        let updated = self
            .jobs
            .update_job(update.id, update.job.into_changes(self.clock.now()))
            .await?
            .ok_or(JobsServiceError::NotFound)?;

        info!(job_id = %updated.id, "updated job");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "jobs.service.delete_job",
        skip(self),
        fields(job_id = %job),
        err
    )]
    async fn delete_job(
        &self,
        job: JobId,
    ) -> Result<bool, JobsServiceError> {
        if self.jobs.get_job(job).await?.is_none() {
            return Ok(false);
        }

        if self.employees.any_active_in_job(job).await? {
            return Err(JobsServiceError::HasActiveEmployees);
        }

        let deactivated = self
            .jobs
            .deactivate_job(job, self.clock.now())
            .await?;

        if deactivated {
            info!(job_id = %job, "deactivated job");
        }

        Ok(deactivated)
    }
}

#[automock]
#[async_trait]
pub trait JobsService: Send + Sync {
    /// One page of active jobs matching the parameters.
    async fn list_jobs(
        &self,
        params: QueryParameters,
    ) -> Result<PagedResult<JobRecord>, JobsServiceError>;

    /// An active job, or `None`.
    async fn get_job(
        &self,
        job: JobId,
    ) -> Result<Option<JobRecord>, JobsServiceError>;

    /// Validate and store a new active job.
    async fn create_job(
        &self,
        job: NewJob,
    ) -> Result<JobRecord, JobsServiceError>;

    /// Replace the title and description of an active job.
    async fn update_job(
        &self,
        update: JobUpdate,
    ) -> Result<JobRecord, JobsServiceError>;

    /// Soft-delete a job. `Ok(false)` when no active job has the id.
    async fn delete_job(
        &self,
        job: JobId,
    ) -> Result<bool, JobsServiceError>;
}
