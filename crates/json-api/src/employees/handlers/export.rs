//! Export Employees Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    prelude::*,
};
use tracing::info;

use tamweely_app::domain::employees::EmployeesServiceError;

use crate::{
    auth::Access,
    employees::{errors::into_api_error, index::employee_parameters},
    errors::ApiError,
    extensions::*,
    observability::observe_export,
    state::State,
};

pub(crate) const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Export Employees Handler
///
/// Builds an `.xlsx` workbook in memory holding every active employee that
/// matches the list filters, and returns it as a download. Paging parameters
/// are ignored; sorting is honoured.
#[endpoint(
    tags("employees"),
    summary = "Export Employees",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Spreadsheet of matching employees"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filters"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Too many matching employees"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let params = employee_parameters(req)?;

    let workbook = match state.app.employees.export_employees(params).await {
        Ok(workbook) => workbook,
        Err(error) => {
            observe_export(match error {
                EmployeesServiceError::ExportTooLarge { .. } => "too_large",
                _ => "error",
            });

            return Err(into_api_error(error));
        }
    };

    let filename = format!(
        "Employees_{}.xlsx",
        state.app.clock.now().strftime("%Y%m%d%H%M%S")
    );

    res.add_header(CONTENT_TYPE, XLSX_CONTENT_TYPE, true)
        .or_500("failed to set content type header")?
        .add_header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
            true,
        )
        .or_500("failed to set content disposition header")?;

    let size = workbook.len();

    res.write_body(workbook)
        .or_500("failed to write export body")?;

    observe_export("ok");
    info!(%filename, size, "employees exported");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tamweely_app::domain::{departments::records::DepartmentId, employees::MockEmployeesService};

    use crate::test_helpers::{employees_service, user_service};

    use super::*;

    fn make_service(employees: MockEmployeesService) -> Service {
        employees_service(employees, Router::with_path("employees/export").get(handler))
    }

    #[tokio::test]
    async fn test_export_returns_named_workbook() -> TestResult {
        let mut employees = MockEmployeesService::new();

        employees
            .expect_export_employees()
            .once()
            .withf(|params| params.department_id == Some(DepartmentId::from_i64(2)))
            .return_once(|_| Ok(b"PK\x03\x04".to_vec()));

        let mut res = TestClient::get("http://example.com/employees/export?departmentId=2")
            .send(&make_service(employees))
            .await;

        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let disposition = res
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(content_type.as_deref(), Some(XLSX_CONTENT_TYPE));
        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"Employees_20260419120000.xlsx\"")
        );
        assert!(body.starts_with("PK"), "expected a zip container");

        Ok(())
    }

    #[tokio::test]
    async fn test_export_over_limit_returns_413() -> TestResult {
        let mut employees = MockEmployeesService::new();

        employees
            .expect_export_employees()
            .once()
            .return_once(|_| {
                Err(EmployeesServiceError::ExportTooLarge {
                    matching: 60_000,
                    limit: 50_000,
                })
            });

        let res = TestClient::get("http://example.com/employees/export")
            .send(&make_service(employees))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PAYLOAD_TOO_LARGE));

        Ok(())
    }

    #[tokio::test]
    async fn test_export_requires_admin() -> TestResult {
        let res = TestClient::get("http://example.com/employees/export")
            .send(&user_service(Router::with_path("employees/export").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
