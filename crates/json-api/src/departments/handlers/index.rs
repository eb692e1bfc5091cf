//! Department Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::{departments::records::DepartmentRecord, query::PagedResult};

use crate::{
    auth::Access,
    departments::{errors::into_api_error, get::DepartmentResponse},
    errors::ApiError,
    extensions::*,
    paging::list_parameters,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DepartmentsResponse {
    /// Departments on the requested page
    pub data: Vec<DepartmentResponse>,

    /// Departments matching the filters across all pages
    pub total_count: u64,

    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl From<PagedResult<DepartmentRecord>> for DepartmentsResponse {
    fn from(page: PagedResult<DepartmentRecord>) -> Self {
        let page = page.map(DepartmentResponse::from);

        DepartmentsResponse {
            data: page.data,
            total_count: page.total_count,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Department Index Handler
///
/// Returns one page of active departments, optionally filtered by name.
#[endpoint(
    tags("departments"),
    summary = "List Departments",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DepartmentsResponse>, ApiError> {
    depot.authorize(Access::Read)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let params = list_parameters(req)?;

    let page = state
        .app
        .departments
        .list_departments(params)
        .await
        .map_err(into_api_error)?;

    Ok(Json(page.into()))
}
