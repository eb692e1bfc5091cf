//! Create Job Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use tamweely_app::domain::jobs::data::NewJob;

use crate::{
    auth::Access,
    jobs::{errors::into_api_error, get::JobResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Job Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateJobRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateJobRequest> for NewJob {
    fn from(request: CreateJobRequest) -> Self {
        NewJob {
            title: request.title,
            description: request.description,
        }
    }
}

/// Create Job Handler
#[endpoint(
    tags("jobs"),
    summary = "Create Job",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Job created"),
        (status_code = StatusCode::CONFLICT, description = "Job title already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateJobRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<JobResponse>, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let job = state
        .app
        .jobs
        .create_job(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/jobs/{}", job.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(job_id = %job.id, "job created");

    Ok(Json(job.into()))
}
