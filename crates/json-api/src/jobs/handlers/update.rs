//! Update Job Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::jobs::{
    data::{JobUpdate, NewJob},
    records::JobId,
};

use crate::{
    auth::Access,
    jobs::{errors::into_api_error, get::JobResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Job Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateJobRequest {
    /// Must match the id in the path
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<UpdateJobRequest> for JobUpdate {
    fn from(request: UpdateJobRequest) -> Self {
        JobUpdate {
            id: JobId::from_i64(request.id),
            job: NewJob {
                title: request.title,
                description: request.description,
            },
        }
    }
}

/// Job Update Handler
#[endpoint(
    tags("jobs"),
    summary = "Update Job",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Job updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Job not found"),
        (status_code = StatusCode::CONFLICT, description = "Job title already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "jobs.update",
    skip(id, json, depot),
    fields(job_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateJobRequest>,
    depot: &mut Depot,
) -> Result<Json<JobResponse>, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();
    let request = json.into_inner();

    tracing::Span::current().record("job_id", id);

    if request.id != id {
        return Err(StatusError::bad_request().brief("ID mismatch").into());
    }

    let job = state
        .app
        .jobs
        .update_job(request.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(job_id = %job.id, "updated job");

    Ok(Json(job.into()))
}
