//! Job Errors

use salvo::http::StatusError;
use tracing::error;

use tamweely_app::domain::jobs::JobsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: JobsServiceError) -> ApiError {
    match error {
        JobsServiceError::Invalid(errors) => ApiError::Validation(errors),
        JobsServiceError::AlreadyExists => {
            StatusError::conflict()
                .brief("A job with this title already exists")
                .into()
        }
        JobsServiceError::NotFound => StatusError::not_found()
            .brief("Job not found")
            .into(),
        JobsServiceError::HasActiveEmployees => StatusError::conflict()
            .brief("Cannot delete a job that has active employees")
            .into(),
        JobsServiceError::Store(source) => {
            error!("job store failure: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
