//! Update Department Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::departments::{
    data::{DepartmentUpdate, NewDepartment},
    records::DepartmentId,
};

use crate::{
    auth::Access,
    departments::{errors::into_api_error, get::DepartmentResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Department Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateDepartmentRequest {
    /// Must match the id in the path
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<UpdateDepartmentRequest> for DepartmentUpdate {
    fn from(request: UpdateDepartmentRequest) -> Self {
        DepartmentUpdate {
            id: DepartmentId::from_i64(request.id),
            department: NewDepartment {
                name: request.name,
                description: request.description,
            },
        }
    }
}

/// Department Update Handler
#[endpoint(
    tags("departments"),
    summary = "Update Department",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Department updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Department not found"),
        (status_code = StatusCode::CONFLICT, description = "Department name already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "departments.update",
    skip(id, json, depot),
    fields(department_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateDepartmentRequest>,
    depot: &mut Depot,
) -> Result<Json<DepartmentResponse>, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();
    let request = json.into_inner();

    tracing::Span::current().record("department_id", id);

    if request.id != id {
        return Err(StatusError::bad_request().brief("ID mismatch").into());
    }

    let department = state
        .app
        .departments
        .update_department(request.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(department_id = %department.id, "updated department");

    Ok(Json(department.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tamweely_app::{
        domain::departments::{DepartmentsServiceError, MockDepartmentsService},
        store::StoreError,
    };

    use crate::test_helpers::{departments_service, make_department};

    use super::*;

    fn make_service(departments: MockDepartmentsService) -> Service {
        departments_service(departments, Router::with_path("departments/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_department_success() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments
            .expect_update_department()
            .once()
            .withf(|update| {
                update.id == DepartmentId::from_i64(2) && update.department.name == "Operations"
            })
            .return_once(|_| Ok(make_department(2, "Operations")));

        let mut res = TestClient::put("http://example.com/departments/2")
            .json(&json!({ "id": 2, "name": "Operations" }))
            .send(&make_service(departments))
            .await;

        let body: DepartmentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Operations");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_id_mismatch_returns_400() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments.expect_update_department().never();

        let res = TestClient::put("http://example.com/departments/2")
            .json(&json!({ "id": 3, "name": "Operations" }))
            .send(&make_service(departments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_inactive_department_returns_404() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments
            .expect_update_department()
            .once()
            .return_once(|_| Err(DepartmentsServiceError::NotFound));

        let res = TestClient::put("http://example.com/departments/2")
            .json(&json!({ "id": 2, "name": "Operations" }))
            .send(&make_service(departments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_store_failure_returns_500() -> TestResult {
        let mut departments = MockDepartmentsService::new();

        departments
            .expect_update_department()
            .once()
            .return_once(|_| {
                Err(DepartmentsServiceError::Store(StoreError::MissingReference))
            });

        let res = TestClient::put("http://example.com/departments/2")
            .json(&json!({ "id": 2, "name": "Operations" }))
            .send(&make_service(departments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
