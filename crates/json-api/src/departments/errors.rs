//! Department Errors

use salvo::http::StatusError;
use tracing::error;

use tamweely_app::domain::departments::DepartmentsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: DepartmentsServiceError) -> ApiError {
    match error {
        DepartmentsServiceError::Invalid(errors) => ApiError::Validation(errors),
        DepartmentsServiceError::AlreadyExists => {
            StatusError::conflict()
                .brief("A department with this name already exists")
                .into()
        }
        DepartmentsServiceError::NotFound => StatusError::not_found()
            .brief("Department not found")
            .into(),
        DepartmentsServiceError::HasActiveEmployees => StatusError::conflict()
            .brief("Cannot delete a department that has active employees")
            .into(),
        DepartmentsServiceError::Store(source) => {
            error!("department store failure: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
