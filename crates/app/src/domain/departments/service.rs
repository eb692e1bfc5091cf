//! Departments service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    clock::Clock,
    domain::{
        departments::{
            data::{DepartmentUpdate, DepartmentUpdateValidator, NewDepartment, NewDepartmentValidator},
            errors::DepartmentsServiceError,
            query::compile,
            records::{DepartmentId, DepartmentRecord},
            repository::DepartmentsRepository,
        },
        employees::EmployeesRepository,
        query::{PagedResult, QueryParameters},
        validation::Validator,
    },
};

pub struct StoreDepartmentsService {
    departments: Arc<dyn DepartmentsRepository>,
    employees: Arc<dyn EmployeesRepository>,
    clock: Arc<dyn Clock>,
}

impl StoreDepartmentsService {
    #[must_use]
    pub fn new(
        departments: Arc<dyn DepartmentsRepository>,
        employees: Arc<dyn EmployeesRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            departments,
            employees,
            clock,
        }
    }
}

impl Debug for StoreDepartmentsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreDepartmentsService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DepartmentsService for StoreDepartmentsService {
    #[tracing::instrument(
        name = "departments.service.list_departments",
        skip(self),
        fields(page_number = params.page_number, page_size = params.page_size),
        err
    )]
    async fn list_departments(
        &self,
        params: QueryParameters,
    ) -> Result<PagedResult<DepartmentRecord>, DepartmentsServiceError> {
        let page = params.page()?;
        let query = compile(&params, page.window());

        let slice = self.departments.find_departments(&query).await?;

        Ok(PagedResult::new(slice, page))
    }

    #[tracing::instrument(
        name = "departments.service.get_department",
        skip(self),
        fields(department_id = %department),
        err
    )]
    async fn get_department(
        &self,
        department: DepartmentId,
    ) -> Result<Option<DepartmentRecord>, DepartmentsServiceError> {
        Ok(self.departments.get_department(department).await?)
    }

    #[tracing::instrument(
        name = "departments.service.create_department",
        skip(self, department),
        err
    )]
    async fn create_department(
        &self,
        department: NewDepartment,
    ) -> Result<DepartmentRecord, DepartmentsServiceError> {
        let department = department.normalized();

        NewDepartmentValidator.validate(&department)?;

        if self
            .departments
            .department_name_taken(&department.name, None)
            .await?
        {
            return Err(DepartmentsServiceError::AlreadyExists);
        }

        let created = self
            .departments
            .insert_department(department.into_draft(self.clock.now()))
            .await?;

        info!(department_id = %created.id, "created department");

        Ok(created)
    }

    #[tracing::instrument(
        name = "departments.service.update_department",
        skip(self, update),
        fields(department_id = %update.id),
        err
    )]
    async fn update_department(
        &self,
        update: DepartmentUpdate,
    ) -> Result<DepartmentRecord, DepartmentsServiceError> {
        let update = update.normalized();

        DepartmentUpdateValidator.validate(&update)?;

        if self.departments.get_department(update.id).await?.is_none() {
            return Err(DepartmentsServiceError::NotFound);
        }

        if self
            .departments
            .department_name_taken(&update.department.name, Some(update.id))
            .await?
        {
            return Err(DepartmentsServiceError::AlreadyExists);
        }

        let updated = self
            .departments
            .update_department(update.id, update.department.into_changes(self.clock.now()))
            .await?
            .ok_or(DepartmentsServiceError::NotFound)?;

        info!(department_id = %updated.id, "updated department");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "departments.service.delete_department",
        skip(self),
        fields(department_id = %department),
        err
    )]
    async fn delete_department(
        &self,
        department: DepartmentId,
    ) -> Result<bool, DepartmentsServiceError> {
        if self.departments.get_department(department).await?.is_none() {
            return Ok(false);
        }

        if self.employees.any_active_in_department(department).await? {
            return Err(DepartmentsServiceError::HasActiveEmployees);
        }

        let deactivated = self
            .departments
            .deactivate_department(department, self.clock.now())
            .await?;

        if deactivated {
            info!(department_id = %department, "deactivated department");
        }

        Ok(deactivated)
    }
}

#[automock]
#[async_trait]
pub trait DepartmentsService: Send + Sync {
    /// One page of active departments matching the parameters.
    async fn list_departments(
        &self,
        params: QueryParameters,
    ) -> Result<PagedResult<DepartmentRecord>, DepartmentsServiceError>;

    /// An active department, or `None`.
    async fn get_department(
        &self,
        department: DepartmentId,
    ) -> Result<Option<DepartmentRecord>, DepartmentsServiceError>;

    /// Validate and store a new active department.
    async fn create_department(
        &self,
        department: NewDepartment,
    ) -> Result<DepartmentRecord, DepartmentsServiceError>;

    /// Replace the name and description of an active department.
    async fn update_department(
        &self,
        update: DepartmentUpdate,
    ) -> Result<DepartmentRecord, DepartmentsServiceError>;

    /// Soft-delete a department. `Ok(false)` when no active department has the id.
    async fn delete_department(
        &self,
        department: DepartmentId,
    ) -> Result<bool, DepartmentsServiceError>;
}
