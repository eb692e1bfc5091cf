//! Delete Job Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use tamweely_app::domain::jobs::records::JobId;

use crate::{
    auth::Access, jobs::errors::into_api_error, errors::ApiError, extensions::*,
    state::State,
};

/// Delete Job Handler
///
/// Soft-deletes a job. Jobs with active employees cannot be deleted.
#[endpoint(
    tags("jobs"),
    summary = "Delete Job",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Job deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Job not found"),
        (status_code = StatusCode::CONFLICT, description = "Job has active employees"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(id: PathParam<i64>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deleted = state
        .app
        .jobs
        .delete_job(JobId::from_i64(id.into_inner()))
        .await
        .map_err(into_api_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusError::not_found().brief("Job not found").into())
    }
}
