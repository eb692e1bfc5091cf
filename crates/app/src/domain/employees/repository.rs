//! Employees Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::{
        departments::records::DepartmentId,
        employees::{
            query::EmployeeQuery,
            records::{EmployeeChanges, EmployeeDraft, EmployeeId, EmployeeRecord},
        },
        jobs::records::JobId,
        query::Slice,
    },
    store::StoreError,
};

/// Employee storage. Records come back joined with their department name and job title.
#[automock]
#[async_trait]
pub trait EmployeesRepository: Send + Sync {
    async fn find_employees(
        &self,
        query: &EmployeeQuery,
    ) -> Result<Slice<EmployeeRecord>, StoreError>;

    /// Number of records matching the query's filters, ignoring its window.
    async fn count_employees(&self, query: &EmployeeQuery) -> Result<u64, StoreError>;

    /// Fetch an active employee.
    async fn get_employee(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<EmployeeRecord>, StoreError>;

    /// Whether another active employee already uses `email`, ignoring case.
    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, StoreError>;

    /// Whether any active employee belongs to the department.
    async fn any_active_in_department(&self, department: DepartmentId) -> Result<bool, StoreError>;

    /// Whether any active employee holds the job.
    async fn any_active_in_job(&self, job: JobId) -> Result<bool, StoreError>;

    async fn insert_employee(&self, draft: EmployeeDraft) -> Result<EmployeeRecord, StoreError>;

    /// Apply changes to an active employee. `None` when no active row matched.
    async fn update_employee(
        &self,
        employee: EmployeeId,
        changes: EmployeeChanges,
    ) -> Result<Option<EmployeeRecord>, StoreError>;

    /// Mark an active employee inactive. `false` when no active row matched.
    async fn deactivate_employee(
        &self,
        employee: EmployeeId,
        at: Timestamp,
    ) -> Result<bool, StoreError>;
}
