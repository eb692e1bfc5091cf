//! Default reference data.

use thiserror::Error;
use tracing::info;

use crate::{
    context::AppContext,
    domain::{
        departments::{DepartmentsServiceError, data::NewDepartment},
        jobs::{JobsServiceError, data::NewJob},
        query::QueryParameters,
    },
};

pub const DEFAULT_DEPARTMENTS: [&str; 3] = ["IT", "HR", "Finance"];

pub const DEFAULT_JOBS: [&str; 3] = ["Developer", "Manager", "Accountant"];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to seed departments")]
    Departments(#[from] DepartmentsServiceError),

    #[error("failed to seed jobs")]
    Jobs(#[from] JobsServiceError),
}

/// Records created by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub departments: usize,
    pub jobs: usize,
}

/// Insert the default departments and jobs into empty tables.
///
/// Each kind is seeded only when no active record of that kind exists.
///
/// # Errors
///
/// Returns an error when a listing or create call fails.
pub async fn seed(ctx: &AppContext) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    if ctx
        .departments
        .list_departments(QueryParameters::default())
        .await?
        .total_count
        == 0
    {
        for name in DEFAULT_DEPARTMENTS {
            ctx.departments
                .create_department(NewDepartment {
                    name: name.to_string(),
                    description: None,
                })
                .await?;

            report.departments += 1;
        }
    }

    if ctx.jobs.list_jobs(QueryParameters::default()).await?.total_count == 0 {
        for title in DEFAULT_JOBS {
            ctx.jobs
                .create_job(NewJob {
                    title: title.to_string(),
                    description: None,
                })
                .await?;

            report.jobs += 1;
        }
    }

    info!(
        departments = report.departments,
        jobs = report.jobs,
        "seeded reference data"
    );

    Ok(report)
}
