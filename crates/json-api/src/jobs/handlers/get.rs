//! Get Job Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::jobs::records::{JobId, JobRecord};

use crate::{
    auth::Access, jobs::errors::into_api_error, errors::ApiError, extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobResponse {
    /// Store-assigned job id
    pub id: i64,

    /// Unique job title
    pub title: String,

    pub description: Option<String>,

    /// Always true for records returned by the API
    pub is_active: bool,

    /// The date and time the job was created
    pub created_at: String,

    /// The date and time the job was last updated
    pub updated_at: String,
}

impl From<JobRecord> for JobResponse {
    fn from(job: JobRecord) -> Self {
        JobResponse {
            id: job.id.into_i64(),
            title: job.title,
            description: job.description,
            is_active: job.is_active,
            created_at: job.created_at.to_string(),
            updated_at: job.updated_at.to_string(),
        }
    }
}

/// Get Job Handler
///
/// Returns an active job.
#[endpoint(
    tags("jobs"),
    summary = "Get Job",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Job found"),
        (status_code = StatusCode::NOT_FOUND, description = "Job not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<JobResponse>, ApiError> {
    depot.authorize(Access::Read)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let job = state
        .app
        .jobs
        .get_job(JobId::from_i64(id.into_inner()))
        .await
        .map_err(into_api_error)?
        .ok_or_else(|| StatusError::not_found().brief("Job not found"))?;

    Ok(Json(job.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tamweely_app::{
        domain::jobs::{JobsServiceError, MockJobsService},
        store::StoreError,
    };

    use crate::test_helpers::{jobs_service, make_job};

    use super::*;

    fn make_service(jobs: MockJobsService) -> Service {
        jobs_service(jobs, Router::with_path("jobs/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_job() -> TestResult {
        let mut jobs = MockJobsService::new();

        jobs.expect_get_job()
            .once()
            .withf(|id| *id == JobId::from_i64(4))
            .return_once(|_| {
                let mut job = make_job(4, "Accountant");

                job.description = Some("Keeps the books".to_string());

                Ok(Some(job))
            });

        let mut res = TestClient::get("http://example.com/jobs/4")
            .send(&make_service(jobs))
            .await;

        let body: JobResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 4);
        assert_eq!(body.title, "Accountant");
        assert_eq!(body.description.as_deref(), Some("Keeps the books"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_job_returns_404() -> TestResult {
        let mut jobs = MockJobsService::new();

        jobs.expect_get_job()
            .once()
            .return_once(|_| Ok(None));

        let res = TestClient::get("http://example.com/jobs/99")
            .send(&make_service(jobs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_store_failure_returns_500() -> TestResult {
        let mut jobs = MockJobsService::new();

        jobs.expect_get_job()
            .once()
            .return_once(|_| Err(JobsServiceError::Store(StoreError::MissingReference)));

        let res = TestClient::get("http://example.com/jobs/4")
            .send(&make_service(jobs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
