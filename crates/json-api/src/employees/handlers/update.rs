//! Update Employee Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::employees::{
    data::{EmployeeUpdate, NewEmployee},
    records::EmployeeId,
};

use crate::{
    auth::Access,
    employees::{create::CreateEmployeeRequest, errors::into_api_error, get::EmployeeResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Employee Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateEmployeeRequest {
    /// Must match the id in the path
    pub id: i64,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub hire_date: String,
    pub department_id: i64,
    pub job_id: i64,
}

impl UpdateEmployeeRequest {
    fn split(self) -> (i64, CreateEmployeeRequest) {
        (
            self.id,
            CreateEmployeeRequest {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone_number: self.phone_number,
                date_of_birth: self.date_of_birth,
                hire_date: self.hire_date,
                department_id: self.department_id,
                job_id: self.job_id,
            },
        )
    }
}

/// Employee Update Handler
///
/// Replaces every editable field of an active employee.
#[endpoint(
    tags("employees"),
    summary = "Update Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Employee updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Employee not found"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "employees.update",
    skip(id, json, depot),
    fields(employee_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateEmployeeRequest>,
    depot: &mut Depot,
) -> Result<Json<EmployeeResponse>, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();
    let (body_id, request) = json.into_inner().split();

    tracing::Span::current().record("employee_id", id);

    if body_id != id {
        return Err(StatusError::bad_request().brief("ID mismatch").into());
    }

    let update = EmployeeUpdate {
        id: EmployeeId::from_i64(id),
        employee: NewEmployee::try_from(request)?,
    };

    let employee = state
        .app
        .employees
        .update_employee(update)
        .await
        .map_err(into_api_error)?;

    tracing::info!(employee_id = %employee.id, "updated employee");

    Ok(Json(EmployeeResponse::new(employee, state.app.clock.today())))
}
