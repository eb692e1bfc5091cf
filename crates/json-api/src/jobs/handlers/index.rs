//! Job Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use tamweely_app::domain::{jobs::records::JobRecord, query::PagedResult};

use crate::{
    auth::Access,
    jobs::{errors::into_api_error, get::JobResponse},
    errors::ApiError,
    extensions::*,
    paging::list_parameters,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobsResponse {
    /// Jobs on the requested page
    pub data: Vec<JobResponse>,

    /// Jobs matching the filters across all pages
    pub total_count: u64,

    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl From<PagedResult<JobRecord>> for JobsResponse {
    fn from(page: PagedResult<JobRecord>) -> Self {
        let page = page.map(JobResponse::from);

        JobsResponse {
            data: page.data,
            total_count: page.total_count,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Job Index Handler
///
/// Returns one page of active jobs, optionally filtered by title.
#[endpoint(
    tags("jobs"),
    summary = "List Jobs",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<JobsResponse>, ApiError> {
    depot.authorize(Access::Read)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let params = list_parameters(req)?;

    let page = state
        .app
        .jobs
        .list_jobs(params)
        .await
        .map_err(into_api_error)?;

    Ok(Json(page.into()))
}
