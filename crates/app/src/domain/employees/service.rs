//! Employees service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    clock::Clock,
    domain::{
        departments::{DepartmentsRepository, records::DepartmentId},
        employees::{
            data::{EmployeeUpdate, EmployeeUpdateValidator, NewEmployee, NewEmployeeValidator},
            errors::{EmployeesServiceError, Reference},
            export::{Cell, sheet_rows, write_workbook},
            query::{EmployeeQueryParameters, compile},
            records::{EmployeeId, EmployeeRecord},
            repository::EmployeesRepository,
        },
        jobs::{JobsRepository, records::JobId},
        query::{PagedResult, Window},
        validation::Validator,
    },
    store::StoreError,
};

/// Exports larger than this are refused unless configured otherwise.
pub const DEFAULT_EXPORT_LIMIT: u64 = 50_000;

pub struct StoreEmployeesService {
    employees: Arc<dyn EmployeesRepository>,
    departments: Arc<dyn DepartmentsRepository>,
    jobs: Arc<dyn JobsRepository>,
    clock: Arc<dyn Clock>,
    export_limit: u64,
}

impl StoreEmployeesService {
    #[must_use]
    pub fn new(
        employees: Arc<dyn EmployeesRepository>,
        departments: Arc<dyn DepartmentsRepository>,
        jobs: Arc<dyn JobsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            employees,
            departments,
            jobs,
            clock,
            export_limit: DEFAULT_EXPORT_LIMIT,
        }
    }

    /// Refuse exports matching more than `limit` employees.
    #[must_use]
    pub fn with_export_limit(mut self, limit: u64) -> Self {
        self.export_limit = limit;
        self
    }

    /// The department and job must both exist and be active.
    async fn check_references(
        &self,
        department: DepartmentId,
        job: JobId,
    ) -> Result<(), EmployeesServiceError> {
        if self.departments.get_department(department).await?.is_none() {
            warn!(department_id = %department, "employee refers to unknown department");

            return Err(EmployeesServiceError::InvalidReference(Reference::Department));
        }

        if self.jobs.get_job(job).await?.is_none() {
            warn!(job_id = %job, "employee refers to unknown job");

            return Err(EmployeesServiceError::InvalidReference(Reference::Job));
        }

        Ok(())
    }

    /// Map a failed employee write. A reference removed after it was checked
    /// trips the store's foreign key; that is reported as the invalid reference.
    async fn write_error(
        &self,
        error: StoreError,
        department: DepartmentId,
        job: JobId,
    ) -> EmployeesServiceError {
        if !matches!(error, StoreError::MissingReference) {
            return error.into();
        }

        match self.check_references(department, job).await {
            Err(error) => error,
            Ok(()) => EmployeesServiceError::Store(error),
        }
    }

    /// Sheet rows for every active employee matching `params`, in list order.
    async fn export_rows(
        &self,
        params: &EmployeeQueryParameters,
    ) -> Result<Vec<[Cell; 9]>, EmployeesServiceError> {
        let query = compile(params, Window::All);

        let matching = self.employees.count_employees(&query).await?;

        if matching > self.export_limit {
            warn!(matching, limit = self.export_limit, "refusing oversize export");

            return Err(EmployeesServiceError::ExportTooLarge {
                matching,
                limit: self.export_limit,
            });
        }

        let slice = self.employees.find_employees(&query).await?;

        Ok(sheet_rows(&slice.records))
    }
}

impl Debug for StoreEmployeesService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreEmployeesService")
            .field("clock", &self.clock)
            .field("export_limit", &self.export_limit)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmployeesService for StoreEmployeesService {
    #[tracing::instrument(
        name = "employees.service.list_employees",
        skip(self),
        fields(page_number = params.common.page_number, page_size = params.common.page_size),
        err
    )]
    async fn list_employees(
        &self,
        params: EmployeeQueryParameters,
    ) -> Result<PagedResult<EmployeeRecord>, EmployeesServiceError> {
        let page = params.common.page()?;
        let query = compile(&params, page.window());

        let slice = self.employees.find_employees(&query).await?;

        Ok(PagedResult::new(slice, page))
    }

    #[tracing::instrument(
        name = "employees.service.get_employee",
        skip(self),
        fields(employee_id = %employee),
        err
    )]
    async fn get_employee(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<EmployeeRecord>, EmployeesServiceError> {
        Ok(self.employees.get_employee(employee).await?)
    }

    #[tracing::instrument(name = "employees.service.create_employee", skip(self, employee), err)]
    async fn create_employee(
        &self,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        let employee = employee.normalized();

        NewEmployeeValidator {
            today: self.clock.today(),
        }
        .validate(&employee)?;

        if self.employees.email_taken(&employee.email, None).await? {
            return Err(EmployeesServiceError::AlreadyExists);
        }

        let (department, job) = (employee.department_id, employee.job_id);

        self.check_references(department, job).await?;

        let created = match self
            .employees
            .insert_employee(employee.into_draft(self.clock.now()))
            .await
        {
            Ok(created) => created,
            Err(error) => return Err(self.write_error(error, department, job).await),
        };

        info!(employee_id = %created.id, "created employee");

        Ok(created)
    }

    #[tracing::instrument(
        name = "employees.service.update_employee",
        skip(self, update),
        fields(employee_id = %update.id),
        err
    )]
    async fn update_employee(
        &self,
        update: EmployeeUpdate,
    ) -> Result<EmployeeRecord, EmployeesServiceError> {
        let update = update.normalized();

        EmployeeUpdateValidator {
            today: self.clock.today(),
        }
        .validate(&update)?;

        if self.employees.get_employee(update.id).await?.is_none() {
            return Err(EmployeesServiceError::NotFound);
        }

        if self
            .employees
            .email_taken(&update.employee.email, Some(update.id))
            .await?
        {
            return Err(EmployeesServiceError::AlreadyExists);
        }

        let (department, job) = (update.employee.department_id, update.employee.job_id);

        self.check_references(department, job).await?;

        let updated = match self
            .employees
            .update_employee(update.id, update.employee.into_changes(self.clock.now()))
            .await
        {
            Ok(updated) => updated.ok_or(EmployeesServiceError::NotFound)?,
            Err(error) => return Err(self.write_error(error, department, job).await),
        };

        info!(employee_id = %updated.id, "updated employee");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "employees.service.delete_employee",
        skip(self),
        fields(employee_id = %employee),
        err
    )]
    async fn delete_employee(&self, employee: EmployeeId) -> Result<bool, EmployeesServiceError> {
        let deactivated = self
            .employees
            .deactivate_employee(employee, self.clock.now())
            .await?;

        if deactivated {
            info!(employee_id = %employee, "deactivated employee");
        }

        Ok(deactivated)
    }

    #[tracing::instrument(name = "employees.service.export_employees", skip(self), err)]
    async fn export_employees(
        &self,
        params: EmployeeQueryParameters,
    ) -> Result<Vec<u8>, EmployeesServiceError> {
        let rows = self.export_rows(&params).await?;
        let bytes = write_workbook(&rows)?;

        info!(rows = rows.len(), bytes = bytes.len(), "exported employees");

        Ok(bytes)
    }
}

#[automock]
#[async_trait]
pub trait EmployeesService: Send + Sync {
    /// One page of active employees matching the parameters.
    async fn list_employees(
        &self,
        params: EmployeeQueryParameters,
    ) -> Result<PagedResult<EmployeeRecord>, EmployeesServiceError>;

    /// An active employee, or `None`.
    async fn get_employee(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<EmployeeRecord>, EmployeesServiceError>;

    /// Validate and store a new active employee.
    async fn create_employee(
        &self,
        employee: NewEmployee,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Replace every field of an active employee.
    async fn update_employee(
        &self,
        update: EmployeeUpdate,
    ) -> Result<EmployeeRecord, EmployeesServiceError>;

    /// Soft-delete an employee. `Ok(false)` when no active employee has the id.
    async fn delete_employee(&self, employee: EmployeeId) -> Result<bool, EmployeesServiceError>;

    /// Every active employee matching the parameters as an `.xlsx` workbook.
    /// Paging parameters are ignored.
    async fn export_employees(
        &self,
        params: EmployeeQueryParameters,
    ) -> Result<Vec<u8>, EmployeesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, civil::date};
    use testresult::TestResult;

    use crate::{
        domain::{
            departments::MockDepartmentsRepository,
            employees::{MockEmployeesRepository, export::employee_row},
            query::QueryParameters,
        },
        test::{TestContext, fixtures},
    };

    use super::*;

    fn params(sort_by: Option<&str>) -> EmployeeQueryParameters {
        EmployeeQueryParameters {
            common: QueryParameters {
                sort_by: sort_by.map(str::to_string),
                ..QueryParameters::default()
            },
            ..EmployeeQueryParameters::default()
        }
    }

    #[tokio::test]
    async fn created_employee_carries_department_and_job_names() -> TestResult {
        let ctx = TestContext::new();

        let department = fixtures::department(&ctx, "Finance").await?;
        let job = fixtures::job(&ctx, "Accountant").await?;

        let created = ctx
            .app
            .employees
            .create_employee(NewEmployee {
                email: "  Nour@Example.com ".to_string(),
                ..fixtures::new_employee("ignored@example.com", department.id, job.id)
            })
            .await?;

        assert_eq!(created.email, "Nour@Example.com");
        assert_eq!(created.department_name, "Finance");
        assert_eq!(created.job_name, "Accountant");
        assert!(created.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_ignoring_case() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;

        fixtures::employee(&ctx, "nour@example.com", department.id, job.id).await?;

        let result = ctx
            .app
            .employees
            .create_employee(fixtures::new_employee("NOUR@example.com", department.id, job.id))
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn inactive_department_is_an_invalid_reference() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;

        ctx.app.departments.delete_department(department.id).await?;

        let result = ctx
            .app
            .employees
            .create_employee(fixtures::new_employee("a@example.com", department.id, job.id))
            .await;

        assert!(
            matches!(
                result,
                Err(EmployeesServiceError::InvalidReference(Reference::Department))
            ),
            "expected department reference error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_job_is_an_invalid_reference() -> TestResult {
        let ctx = TestContext::new();
        let department = fixtures::department(&ctx, "IT").await?;

        let result = ctx
            .app
            .employees
            .create_employee(fixtures::new_employee(
                "a@example.com",
                department.id,
                JobId::from_i64(99),
            ))
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::InvalidReference(Reference::Job))),
            "expected job reference error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn birth_date_exactly_65_years_ago_is_rejected() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;
        let today = ctx.clock.today();

        let too_old = NewEmployee {
            date_of_birth: today.checked_sub(65.years())?,
            ..fixtures::new_employee("old@example.com", department.id, job.id)
        };

        let result = ctx.app.employees.create_employee(too_old).await;

        assert!(
            matches!(result, Err(EmployeesServiceError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );

        let just_young_enough = NewEmployee {
            date_of_birth: today.checked_sub(65.years())?.tomorrow()?,
            ..fixtures::new_employee("old@example.com", department.id, job.id)
        };

        ctx.app.employees.create_employee(just_young_enough).await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_can_move_employee_and_keep_own_email() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;
        let hr = fixtures::department(&ctx, "HR").await?;

        let created = fixtures::employee(&ctx, "a@example.com", department.id, job.id).await?;

        let updated = ctx
            .app
            .employees
            .update_employee(EmployeeUpdate {
                id: created.id,
                employee: fixtures::new_employee("A@example.com", hr.id, job.id),
            })
            .await?;

        assert_eq!(updated.department_id, hr.id);
        assert_eq!(updated.department_name, "HR");
        assert_eq!(updated.created_at, created.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_of_deleted_employee_is_not_found_but_delete_is_false() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;

        let created = fixtures::employee(&ctx, "a@example.com", department.id, job.id).await?;

        assert!(ctx.app.employees.delete_employee(created.id).await?);
        assert!(!ctx.app.employees.delete_employee(created.id).await?);

        let result = ctx
            .app
            .employees
            .update_employee(EmployeeUpdate {
                id: created.id,
                employee: fixtures::new_employee("a@example.com", department.id, job.id),
            })
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_employees_free_their_email_and_leave_lists() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;

        let first = fixtures::employee(&ctx, "a@example.com", department.id, job.id).await?;
        ctx.app.employees.delete_employee(first.id).await?;

        fixtures::employee(&ctx, "a@example.com", department.id, job.id).await?;

        let listed = ctx.app.employees.list_employees(params(None)).await?;

        assert_eq!(listed.total_count, 1);
        assert!(
            listed.data.iter().all(|employee| employee.id != first.id),
            "deleted employee should not be listed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_totals() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;

        for n in 0..3 {
            fixtures::employee(&ctx, &format!("e{n}@example.com"), department.id, job.id).await?;
        }

        let page = ctx
            .app
            .employees
            .list_employees(EmployeeQueryParameters {
                common: QueryParameters {
                    page_number: 5,
                    page_size: 2,
                    ..QueryParameters::default()
                },
                ..EmployeeQueryParameters::default()
            })
            .await?;

        assert!(page.data.is_empty(), "expected an empty page");
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_department_and_hire_date() -> TestResult {
        let ctx = TestContext::new();
        let (it, job) = fixtures::department_and_job(&ctx).await?;
        let hr = fixtures::department(&ctx, "HR").await?;

        ctx.app
            .employees
            .create_employee(NewEmployee {
                hire_date: date(2019, 5, 1),
                ..fixtures::new_employee("old-hire@example.com", it.id, job.id)
            })
            .await?;
        let recent = ctx
            .app
            .employees
            .create_employee(NewEmployee {
                hire_date: date(2024, 5, 1),
                ..fixtures::new_employee("new-hire@example.com", it.id, job.id)
            })
            .await?;
        fixtures::employee(&ctx, "hr@example.com", hr.id, job.id).await?;

        let page = ctx
            .app
            .employees
            .list_employees(EmployeeQueryParameters {
                department_id: Some(it.id),
                hire_date_from: Some(date(2024, 1, 1)),
                ..EmployeeQueryParameters::default()
            })
            .await?;

        assert_eq!(page.total_count, 1);
        assert_eq!(page.data.first().map(|e| e.id), Some(recent.id));

        Ok(())
    }

    #[tokio::test]
    async fn export_rows_match_the_unpaged_list_order() -> TestResult {
        let ctx = TestContext::new();
        let (it, job) = fixtures::department_and_job(&ctx).await?;
        let hr = fixtures::department(&ctx, "HR").await?;

        for (first, last, department) in [
            ("Zeina", "Adel", it.id),
            ("Ahmed", "Zaki", it.id),
            ("Karim", "Saad", hr.id),
            ("mariam", "Adel", it.id),
        ] {
            ctx.app
                .employees
                .create_employee(NewEmployee {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    ..fixtures::new_employee(
                        &format!("{}@example.com", first.to_lowercase()),
                        department,
                        job.id,
                    )
                })
                .await?;
        }

        let filters = EmployeeQueryParameters {
            common: QueryParameters {
                page_size: 100,
                ..QueryParameters::default()
            },
            department_id: Some(it.id),
            ..EmployeeQueryParameters::default()
        };

        let listed = ctx.app.employees.list_employees(filters.clone()).await?;

        let first_names: Vec<_> = listed.data.iter().map(|e| e.first_name.as_str()).collect();

        assert_eq!(first_names, vec!["mariam", "Zeina", "Ahmed"]);

        let service = StoreEmployeesService::new(
            ctx.store.clone(),
            ctx.store.clone(),
            ctx.store.clone(),
            ctx.clock.clone(),
        );

        let rows = service.export_rows(&filters).await?;

        assert_eq!(rows, listed.data.iter().map(employee_row).collect::<Vec<_>>());

        let bytes = service.export_employees(filters).await?;

        assert!(bytes.starts_with(b"PK"), "expected an xlsx archive");

        Ok(())
    }

    #[tokio::test]
    async fn export_over_the_limit_is_refused_before_loading_rows() {
        let mut employees = MockEmployeesRepository::new();
        employees.expect_count_employees().once().returning(|_| Ok(11));
        employees.expect_find_employees().never();

        let ctx = TestContext::new();
        let service = StoreEmployeesService::new(
            Arc::new(employees),
            ctx.store.clone(),
            ctx.store.clone(),
            ctx.clock.clone(),
        )
        .with_export_limit(10);

        let result = service.export_employees(params(None)).await;

        assert!(
            matches!(
                result,
                Err(EmployeesServiceError::ExportTooLarge { matching: 11, limit: 10 })
            ),
            "expected ExportTooLarge, got {result:?}"
        );
    }

    #[tokio::test]
    async fn department_removed_during_create_is_an_invalid_reference() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;
        let department_id = department.id;

        let mut lookups = 0;
        let mut departments = MockDepartmentsRepository::new();
        departments
            .expect_get_department()
            .times(2)
            .returning(move |_| {
                lookups += 1;

                if lookups == 1 {
                    Ok(Some(department.clone()))
                } else {
                    Ok(None)
                }
            });

        let mut employees = MockEmployeesRepository::new();
        employees.expect_email_taken().once().returning(|_, _| Ok(false));
        employees
            .expect_insert_employee()
            .once()
            .returning(|_| Err(StoreError::MissingReference));

        let service = StoreEmployeesService::new(
            Arc::new(employees),
            Arc::new(departments),
            ctx.store.clone(),
            ctx.clock.clone(),
        );

        let result = service
            .create_employee(fixtures::new_employee("late@example.com", department_id, job.id))
            .await;

        assert!(
            matches!(
                result,
                Err(EmployeesServiceError::InvalidReference(Reference::Department))
            ),
            "expected InvalidReference(Department), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unexplained_foreign_key_failure_stays_a_store_error() -> TestResult {
        let ctx = TestContext::new();
        let (department, job) = fixtures::department_and_job(&ctx).await?;
        let existing = fixtures::employee(&ctx, "rana@example.com", department.id, job.id).await?;

        let mut employees = MockEmployeesRepository::new();
        let current = existing.clone();
        employees
            .expect_get_employee()
            .once()
            .returning(move |_| Ok(Some(current.clone())));
        employees.expect_email_taken().once().returning(|_, _| Ok(false));
        employees
            .expect_update_employee()
            .once()
            .returning(|_, _| Err(StoreError::MissingReference));

        let service = StoreEmployeesService::new(
            Arc::new(employees),
            ctx.store.clone(),
            ctx.store.clone(),
            ctx.clock.clone(),
        );

        let result = service
            .update_employee(EmployeeUpdate {
                id: existing.id,
                employee: fixtures::new_employee("rana@example.com", department.id, job.id),
            })
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::Store(StoreError::MissingReference))),
            "expected Store(MissingReference), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn references_are_checked_after_validation() {
        let ctx = TestContext::new();

        let mut departments = MockDepartmentsRepository::new();
        departments.expect_get_department().never();

        let service = StoreEmployeesService::new(
            ctx.store.clone(),
            Arc::new(departments),
            ctx.store.clone(),
            ctx.clock.clone(),
        );

        let result = service
            .create_employee(fixtures::new_employee(
                "bad",
                DepartmentId::from_i64(1),
                JobId::from_i64(1),
            ))
            .await;

        assert!(
            matches!(result, Err(EmployeesServiceError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );
    }
}
