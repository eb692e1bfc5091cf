//! Create Employee Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use tamweely_app::domain::{
    departments::records::DepartmentId,
    employees::data::{EmployeeDetails, EmployeeDetailsValidator, NewEmployee},
    jobs::records::JobId,
    validation::{ValidationErrors, Validator},
};

use crate::{
    auth::Access,
    employees::{dates::required_date, errors::into_api_error, get::EmployeeResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Employee Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Eleven digit Egyptian mobile number, e.g. `01012345678`
    pub phone_number: String,

    /// `YYYY-MM-DD`
    pub date_of_birth: String,

    /// `YYYY-MM-DD`
    pub hire_date: String,

    pub department_id: i64,
    pub job_id: i64,
}

impl TryFrom<CreateEmployeeRequest> for NewEmployee {
    type Error = ValidationErrors;

    fn try_from(request: CreateEmployeeRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let date_of_birth = required_date(
            &mut errors,
            "dateOfBirth",
            "Date of birth",
            &request.date_of_birth,
        );
        let hire_date = required_date(&mut errors, "hireDate", "Hire date", &request.hire_date);

        let (Some(date_of_birth), Some(hire_date)) = (date_of_birth, hire_date) else {
            let details = EmployeeDetails {
                first_name: &request.first_name,
                last_name: &request.last_name,
                email: &request.email,
                phone_number: &request.phone_number,
                department_id: DepartmentId::from_i64(request.department_id),
                job_id: JobId::from_i64(request.job_id),
            };

            EmployeeDetailsValidator.check(&details, &mut errors);

            return Err(errors);
        };

        Ok(NewEmployee {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            date_of_birth,
            hire_date,
            department_id: DepartmentId::from_i64(request.department_id),
            job_id: JobId::from_i64(request.job_id),
        })
    }
}

/// Create Employee Handler
#[endpoint(
    tags("employees"),
    summary = "Create Employee",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Employee created"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateEmployeeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EmployeeResponse>, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_employee = NewEmployee::try_from(json.into_inner())?;

    let employee = state
        .app
        .employees
        .create_employee(new_employee)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/employees/{}", employee.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(employee_id = %employee.id, "employee created");

    Ok(Json(EmployeeResponse::new(employee, state.app.clock.today())))
}
