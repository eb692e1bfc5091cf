//! Delete Department Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use tamweely_app::domain::departments::records::DepartmentId;

use crate::{
    auth::Access, departments::errors::into_api_error, errors::ApiError, extensions::*,
    state::State,
};

/// Delete Department Handler
///
/// Soft-deletes a department. Departments with active employees cannot be deleted.
#[endpoint(
    tags("departments"),
    summary = "Delete Department",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Department deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Department not found"),
        (status_code = StatusCode::CONFLICT, description = "Department has active employees"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(id: PathParam<i64>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let deleted = state
        .app
        .departments
        .delete_department(DepartmentId::from_i64(id.into_inner()))
        .await
        .map_err(into_api_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusError::not_found().brief("Department not found").into())
    }
}
