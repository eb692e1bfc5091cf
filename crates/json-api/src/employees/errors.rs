//! Employee Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use tamweely_app::domain::{
    employees::{EmployeesServiceError, Reference},
    validation::ValidationErrors,
};

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: EmployeesServiceError) -> ApiError {
    match error {
        EmployeesServiceError::Invalid(errors) => ApiError::Validation(errors),
        EmployeesServiceError::InvalidReference(reference) => {
            ApiError::Validation(reference_errors(reference))
        }
        EmployeesServiceError::AlreadyExists => StatusError::conflict()
            .brief("An employee with this email already exists")
            .into(),
        EmployeesServiceError::NotFound => {
            StatusError::not_found().brief("Employee not found").into()
        }
        EmployeesServiceError::ExportTooLarge { matching, limit } => {
            warn!(matching, limit, "employee export over limit");

            StatusError::payload_too_large()
                .brief(format!(
                    "Export matches {matching} employees, more than the limit of {limit}. Narrow the filters."
                ))
                .into()
        }
        EmployeesServiceError::Export(source) => {
            error!("failed to write employee export: {source}");

            StatusError::internal_server_error().into()
        }
        EmployeesServiceError::Store(source) => {
            error!("employee store failure: {source}");

            StatusError::internal_server_error().into()
        }
    }
}

fn reference_errors(reference: Reference) -> ValidationErrors {
    match reference {
        Reference::Department => ValidationErrors::single(
            "departmentId",
            "Department does not exist or is inactive",
        ),
        Reference::Job => {
            ValidationErrors::single("jobId", "Job title does not exist or is inactive")
        }
    }
}
