//! Create Department Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use tamweely_app::domain::departments::data::NewDepartment;

use crate::{
    auth::Access,
    departments::{errors::into_api_error, get::DepartmentResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Department Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateDepartmentRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateDepartmentRequest> for NewDepartment {
    fn from(request: CreateDepartmentRequest) -> Self {
        NewDepartment {
            name: request.name,
            description: request.description,
        }
    }
}

/// Create Department Handler
#[endpoint(
    tags("departments"),
    summary = "Create Department",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Department created"),
        (status_code = StatusCode::CONFLICT, description = "Department name already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateDepartmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DepartmentResponse>, ApiError> {
    depot.authorize(Access::Write)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let department = state
        .app
        .departments
        .create_department(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/departments/{}", department.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(department_id = %department.id, "department created");

    Ok(Json(department.into()))
}
