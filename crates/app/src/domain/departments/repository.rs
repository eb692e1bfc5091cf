//! Departments Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::{
        departments::{
            query::DepartmentQuery,
            records::{DepartmentChanges, DepartmentDraft, DepartmentId, DepartmentRecord},
        },
        query::Slice,
    },
    store::StoreError,
};

/// Department storage. Every call is atomic on its own.
#[automock]
#[async_trait]
pub trait DepartmentsRepository: Send + Sync {
    /// Run a compiled query, returning the window and the filtered total.
    async fn find_departments(
        &self,
        query: &DepartmentQuery,
    ) -> Result<Slice<DepartmentRecord>, StoreError>;

    /// Fetch an active department.
    async fn get_department(
        &self,
        department: DepartmentId,
    ) -> Result<Option<DepartmentRecord>, StoreError>;

    /// Whether another active department already uses `name`, ignoring case.
    async fn department_name_taken(
        &self,
        name: &str,
        excluding: Option<DepartmentId>,
    ) -> Result<bool, StoreError>;

    async fn insert_department(
        &self,
        draft: DepartmentDraft,
    ) -> Result<DepartmentRecord, StoreError>;

    /// Apply changes to an active department. `None` when no active row matched.
    async fn update_department(
        &self,
        department: DepartmentId,
        changes: DepartmentChanges,
    ) -> Result<Option<DepartmentRecord>, StoreError>;

    /// Mark an active department inactive. `false` when no active row matched.
    async fn deactivate_department(
        &self,
        department: DepartmentId,
        at: Timestamp,
    ) -> Result<bool, StoreError>;
}
