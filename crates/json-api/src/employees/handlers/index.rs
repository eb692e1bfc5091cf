//! Employee Index Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::{
    departments::records::DepartmentId,
    employees::{query::EmployeeQueryParameters, records::EmployeeRecord},
    jobs::records::JobId,
    query::PagedResult,
    validation::ValidationErrors,
};

use crate::{
    auth::Access,
    employees::{dates::optional_date, errors::into_api_error, get::EmployeeResponse},
    errors::ApiError,
    extensions::*,
    paging::list_parameters,
    state::State,
};

/// `?departmentId=&jobId=&dateOfBirthFrom=&dateOfBirthTo=&hireDateFrom=&hireDateTo=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EmployeeFilterQuery {
    department_id: Option<i64>,
    job_id: Option<i64>,
    date_of_birth_from: Option<String>,
    date_of_birth_to: Option<String>,
    hire_date_from: Option<String>,
    hire_date_to: Option<String>,
}

/// Read the common list parameters and the employee filters from the query
/// string. Shared with the export handler.
pub(crate) fn employee_parameters(req: &mut Request) -> Result<EmployeeQueryParameters, ApiError> {
    let common = list_parameters(req)?;
    let filters = req
        .parse_queries::<EmployeeFilterQuery>()
        .or_400("could not parse employee filters")?;

    let mut errors = ValidationErrors::new();

    let params = EmployeeQueryParameters {
        common,
        department_id: filters.department_id.map(DepartmentId::from_i64),
        job_id: filters.job_id.map(JobId::from_i64),
        date_of_birth_from: optional_date(
            &mut errors,
            "dateOfBirthFrom",
            filters.date_of_birth_from.as_deref(),
        ),
        date_of_birth_to: optional_date(
            &mut errors,
            "dateOfBirthTo",
            filters.date_of_birth_to.as_deref(),
        ),
        hire_date_from: optional_date(&mut errors, "hireDateFrom", filters.hire_date_from.as_deref()),
        hire_date_to: optional_date(&mut errors, "hireDateTo", filters.hire_date_to.as_deref()),
    };

    errors.into_result().map_err(ApiError::Validation)?;

    Ok(params)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmployeesResponse {
    pub data: Vec<EmployeeResponse>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl EmployeesResponse {
    fn new(page: PagedResult<EmployeeRecord>, today: Date) -> Self {
        let page = page.map(|employee| EmployeeResponse::new(employee, today));

        EmployeesResponse {
            data: page.data,
            total_count: page.total_count,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Employee Index Handler
///
/// Returns one page of active employees. Search matches names, email and
/// phone number; the other filters narrow by department, job and date ranges.
#[endpoint(
    tags("employees"),
    summary = "List Employees",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of employees"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging or filters"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<EmployeesResponse>, ApiError> {
    depot.authorize(Access::Read)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let params = employee_parameters(req)?;

    let page = state
        .app
        .employees
        .list_employees(params)
        .await
        .map_err(into_api_error)?;

    Ok(Json(EmployeesResponse::new(page, state.app.clock.today())))
}
