//! Get Department Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::departments::records::{DepartmentId, DepartmentRecord};

use crate::{
    auth::Access, departments::errors::into_api_error, errors::ApiError, extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DepartmentResponse {
    /// Store-assigned department id
    pub id: i64,

    /// Unique department name
    pub name: String,

    pub description: Option<String>,

    /// Always true for records returned by the API
    pub is_active: bool,

    /// The date and time the department was created
    pub created_at: String,

    /// The date and time the department was last updated
    pub updated_at: String,
}

impl From<DepartmentRecord> for DepartmentResponse {
    fn from(department: DepartmentRecord) -> Self {
        DepartmentResponse {
            id: department.id.into_i64(),
            name: department.name,
            description: department.description,
            is_active: department.is_active,
            created_at: department.created_at.to_string(),
            updated_at: department.updated_at.to_string(),
        }
    }
}

/// Get Department Handler
///
/// Returns an active department.
#[endpoint(
    tags("departments"),
    summary = "Get Department",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Department found"),
        (status_code = StatusCode::NOT_FOUND, description = "Department not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<DepartmentResponse>, ApiError> {
    depot.authorize(Access::Read)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let department = state
        .app
        .departments
        .get_department(DepartmentId::from_i64(id.into_inner()))
        .await
        .map_err(into_api_error)?
        .ok_or_else(|| StatusError::not_found().brief("Department not found"))?;

    Ok(Json(department.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tamweely_app::domain::departments::MockDepartmentsService;

    use crate::test_helpers::{departments_service, make_department};

    use super::*;

    fn make_service(departments: MockDepartmentsService) -> Service {
        departments_service(departments, Router::with_path("departments/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_department() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments
            .expect_get_department()
            .once()
            .withf(|id| *id == DepartmentId::from_i64(4))
            .return_once(|_| Ok(Some(make_department(4, "Finance"))));

        let mut res = TestClient::get("http://example.com/departments/4")
            .send(&make_service(departments))
            .await;

        let body: DepartmentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 4);
        assert_eq!(body.name, "Finance");
        assert!(body.is_active, "returned departments are active");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_department_returns_404() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments
            .expect_get_department()
            .once()
            .return_once(|_| Ok(None));

        let res = TestClient::get("http://example.com/departments/99")
            .send(&make_service(departments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments.expect_get_department().never();

        let res = TestClient::get("http://example.com/departments/finance")
            .send(&make_service(departments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
