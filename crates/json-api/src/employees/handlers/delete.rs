//! Delete Employee Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use tamweely_app::domain::employees::records::EmployeeId;

use crate::{
    auth::Access, employees::errors::into_api_error, errors::ApiError, extensions::*,
    state::State,
};

/// Delete Employee Handler
///
/// Soft-deletes an employee, freeing their email for reuse.
#[endpoint(
    tags("employees"),
    summary = "Delete Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Employee deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Employee not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(id: PathParam<i64>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deleted = state
        .app
        .employees
        .delete_employee(EmployeeId::from_i64(id.into_inner()))
        .await
        .map_err(into_api_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusError::not_found().brief("Employee not found").into())
    }
}
