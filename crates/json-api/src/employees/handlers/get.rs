//! Get Employee Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::employees::records::{EmployeeId, EmployeeRecord};

use crate::{
    auth::Access, employees::errors::into_api_error, errors::ApiError, extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmployeeResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,

    /// `YYYY-MM-DD`
    pub date_of_birth: String,

    /// Whole years completed as of today
    pub age: i16,

    /// `YYYY-MM-DD`
    pub hire_date: String,

    pub department_id: i64,
    pub department_name: String,
    pub job_id: i64,
    pub job_name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl EmployeeResponse {
    pub(crate) fn new(employee: EmployeeRecord, today: Date) -> Self {
        let age = employee.age(today);

        EmployeeResponse {
            id: employee.id.into_i64(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            phone_number: employee.phone_number,
            date_of_birth: employee.date_of_birth.to_string(),
            age,
            hire_date: employee.hire_date.to_string(),
            department_id: employee.department_id.into_i64(),
            department_name: employee.department_name,
            job_id: employee.job_id.into_i64(),
            job_name: employee.job_name,
            is_active: employee.is_active,
            created_at: employee.created_at.to_string(),
            updated_at: employee.updated_at.to_string(),
        }
    }
}

/// Get Employee Handler
///
/// Returns an active employee with department and job names resolved.
#[endpoint(
    tags("employees"),
    summary = "Get Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Employee found"),
        (status_code = StatusCode::NOT_FOUND, description = "Employee not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<EmployeeResponse>, ApiError> {
    depot.authorize(Access::Read)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let employee = state
        .app
        .employees
        .get_employee(EmployeeId::from_i64(id.into_inner()))
        .await
        .map_err(into_api_error)?
        .ok_or_else(|| StatusError::not_found().brief("Employee not found"))?;

    Ok(Json(EmployeeResponse::new(employee, state.app.clock.today())))
}
