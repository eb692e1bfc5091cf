//! Test Fixtures

use std::error::Error;

use jiff::civil::date;

use crate::{
    domain::{
        departments::{
            DepartmentsServiceError,
            data::NewDepartment,
            records::{DepartmentId, DepartmentRecord},
        },
        employees::{EmployeesServiceError, data::NewEmployee, records::EmployeeRecord},
        jobs::{
            JobsServiceError,
            data::NewJob,
            records::{JobId, JobRecord},
        },
    },
    test::TestContext,
};

pub(crate) async fn department(
    ctx: &TestContext,
    name: &str,
) -> Result<DepartmentRecord, DepartmentsServiceError> {
    ctx.app
        .departments
        .create_department(NewDepartment {
            name: name.to_string(),
            description: None,
        })
        .await
}

pub(crate) async fn job(ctx: &TestContext, title: &str) -> Result<JobRecord, JobsServiceError> {
    ctx.app
        .jobs
        .create_job(NewJob {
            title: title.to_string(),
            description: None,
        })
        .await
}

/// An "IT" department and a "Developer" job.
pub(crate) async fn department_and_job(
    ctx: &TestContext,
) -> Result<(DepartmentRecord, JobRecord), Box<dyn Error>> {
    Ok((department(ctx, "IT").await?, job(ctx, "Developer").await?))
}

/// A valid employee payload for the test clock's date.
pub(crate) fn new_employee(email: &str, department: DepartmentId, job: JobId) -> NewEmployee {
    NewEmployee {
        first_name: "Youssef".to_string(),
        last_name: "Kamal".to_string(),
        email: email.to_string(),
        phone_number: "01098765432".to_string(),
        date_of_birth: date(1992, 3, 14),
        hire_date: date(2023, 6, 1),
        department_id: department,
        job_id: job,
    }
}

pub(crate) async fn employee(
    ctx: &TestContext,
    email: &str,
    department: DepartmentId,
    job: JobId,
) -> Result<EmployeeRecord, EmployeesServiceError> {
    ctx.app
        .employees
        .create_employee(new_employee(email, department, job))
        .await
}
