//! In-memory record store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use tokio::sync::RwLock;

use crate::{
    domain::{
        departments::{
            DepartmentsRepository,
            query::DepartmentQuery,
            records::{DepartmentChanges, DepartmentDraft, DepartmentId, DepartmentRecord},
        },
        employees::{
            EmployeesRepository,
            query::EmployeeQuery,
            records::{EmployeeChanges, EmployeeDraft, EmployeeId, EmployeeRecord},
        },
        jobs::{
            JobsRepository,
            query::JobQuery,
            records::{JobChanges, JobDraft, JobId, JobRecord},
        },
        query::Slice,
    },
    ids::TypedId,
    store::StoreError,
};

/// Stores every table behind one lock, so each call sees and leaves a consistent state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct Tables {
    departments: BTreeMap<DepartmentId, DepartmentRecord>,
    jobs: BTreeMap<JobId, JobRecord>,
    employees: BTreeMap<EmployeeId, EmployeeRow>,
    sequences: Sequences,
}

#[derive(Debug, Default)]
struct Sequences {
    departments: i64,
    jobs: i64,
    employees: i64,
}

fn next_id<T>(sequence: &mut i64) -> TypedId<T> {
    *sequence += 1;

    TypedId::from_i64(*sequence)
}

/// Employees are stored without the joined names.
#[derive(Debug, Clone)]
struct EmployeeRow {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    date_of_birth: Date,
    hire_date: Date,
    department_id: DepartmentId,
    job_id: JobId,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Tables {
    fn join(&self, row: &EmployeeRow) -> EmployeeRecord {
        EmployeeRecord {
            id: row.id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            phone_number: row.phone_number.clone(),
            date_of_birth: row.date_of_birth,
            hire_date: row.hire_date,
            department_id: row.department_id,
            department_name: self
                .departments
                .get(&row.department_id)
                .map(|department| department.name.clone())
                .unwrap_or_default(),
            job_id: row.job_id,
            job_name: self
                .jobs
                .get(&row.job_id)
                .map(|job| job.title.clone())
                .unwrap_or_default(),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn joined_employees(&self) -> Vec<EmployeeRecord> {
        self.employees.values().map(|row| self.join(row)).collect()
    }

    fn department_name_taken(&self, name: &str, excluding: Option<DepartmentId>) -> bool {
        self.departments.values().any(|department| {
            department.is_active
                && Some(department.id) != excluding
                && department.name.to_lowercase() == name.to_lowercase()
        })
    }

    fn job_title_taken(&self, title: &str, excluding: Option<JobId>) -> bool {
        self.jobs.values().any(|job| {
            job.is_active && Some(job.id) != excluding && job.title.to_lowercase() == title.to_lowercase()
        })
    }

    fn email_taken(&self, email: &str, excluding: Option<EmployeeId>) -> bool {
        self.employees.values().any(|employee| {
            employee.is_active
                && Some(employee.id) != excluding
                && employee.email.to_lowercase() == email.to_lowercase()
        })
    }

    fn check_references(&self, department: DepartmentId, job: JobId) -> Result<(), StoreError> {
        if self.departments.contains_key(&department) && self.jobs.contains_key(&job) {
            Ok(())
        } else {
            Err(StoreError::MissingReference)
        }
    }
}

#[async_trait]
impl DepartmentsRepository for MemoryStore {
    async fn find_departments(
        &self,
        query: &DepartmentQuery,
    ) -> Result<Slice<DepartmentRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(query.apply(tables.departments.values().cloned()))
    }

    async fn get_department(
        &self,
        department: DepartmentId,
    ) -> Result<Option<DepartmentRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .departments
            .get(&department)
            .filter(|record| record.is_active)
            .cloned())
    }

    async fn department_name_taken(
        &self,
        name: &str,
        excluding: Option<DepartmentId>,
    ) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.department_name_taken(name, excluding))
    }

    async fn insert_department(
        &self,
        draft: DepartmentDraft,
    ) -> Result<DepartmentRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if draft.is_active && tables.department_name_taken(&draft.name, None) {
            return Err(StoreError::Conflict);
        }

        let record = DepartmentRecord {
            id: next_id(&mut tables.sequences.departments),
            name: draft.name,
            description: draft.description,
            is_active: draft.is_active,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };

        tables.departments.insert(record.id, record.clone());

        Ok(record)
    }

    async fn update_department(
        &self,
        department: DepartmentId,
        changes: DepartmentChanges,
    ) -> Result<Option<DepartmentRecord>, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.department_name_taken(&changes.name, Some(department)) {
            return Err(StoreError::Conflict);
        }

        let Some(record) = tables
            .departments
            .get_mut(&department)
            .filter(|record| record.is_active)
        else {
            return Ok(None);
        };

        record.name = changes.name;
        record.description = changes.description;
        record.updated_at = changes.updated_at;

        Ok(Some(record.clone()))
    }

    async fn deactivate_department(
        &self,
        department: DepartmentId,
        at: Timestamp,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;

        Ok(match tables.departments.get_mut(&department) {
            Some(record) if record.is_active => {
                record.is_active = false;
                record.updated_at = at;
                true
            }
            _ => false,
        })
    }
}

#[async_trait]
impl JobsRepository for MemoryStore {
    async fn find_jobs(&self, query: &JobQuery) -> Result<Slice<JobRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(query.apply(tables.jobs.values().cloned()))
    }

    async fn get_job(&self, job: JobId) -> Result<Option<JobRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables.jobs.get(&job).filter(|record| record.is_active).cloned())
    }

    async fn job_title_taken(
        &self,
        title: &str,
        excluding: Option<JobId>,
    ) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.job_title_taken(title, excluding))
    }

    async fn insert_job(&self, draft: JobDraft) -> Result<JobRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if draft.is_active && tables.job_title_taken(&draft.title, None) {
            return Err(StoreError::Conflict);
        }

        let record = JobRecord {
            id: next_id(&mut tables.sequences.jobs),
            title: draft.title,
            description: draft.description,
            is_active: draft.is_active,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };

        tables.jobs.insert(record.id, record.clone());

        Ok(record)
    }

    async fn update_job(
        &self,
        job: JobId,
        changes: JobChanges,
    ) -> Result<Option<JobRecord>, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.job_title_taken(&changes.title, Some(job)) {
            return Err(StoreError::Conflict);
        }

        let Some(record) = tables.jobs.get_mut(&job).filter(|record| record.is_active) else {
            return Ok(None);
        };

        record.title = changes.title;
        record.description = changes.description;
        record.updated_at = changes.updated_at;

        Ok(Some(record.clone()))
    }

    async fn deactivate_job(&self, job: JobId, at: Timestamp) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;

        Ok(match tables.jobs.get_mut(&job) {
            Some(record) if record.is_active => {
                record.is_active = false;
                record.updated_at = at;
                true
            }
            _ => false,
        })
    }
}

#[async_trait]
impl EmployeesRepository for MemoryStore {
    async fn find_employees(
        &self,
        query: &EmployeeQuery,
    ) -> Result<Slice<EmployeeRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(query.apply(tables.joined_employees()))
    }

    async fn count_employees(&self, query: &EmployeeQuery) -> Result<u64, StoreError> {
        let tables = self.tables.read().await;

        Ok(query.apply(tables.joined_employees()).total)
    }

    async fn get_employee(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<EmployeeRecord>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .employees
            .get(&employee)
            .filter(|row| row.is_active)
            .map(|row| tables.join(row)))
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.email_taken(email, excluding))
    }

    async fn any_active_in_department(&self, department: DepartmentId) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .employees
            .values()
            .any(|row| row.is_active && row.department_id == department))
    }

    async fn any_active_in_job(&self, job: JobId) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .employees
            .values()
            .any(|row| row.is_active && row.job_id == job))
    }

    async fn insert_employee(&self, draft: EmployeeDraft) -> Result<EmployeeRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if draft.is_active && tables.email_taken(&draft.email, None) {
            return Err(StoreError::Conflict);
        }

        tables.check_references(draft.department_id, draft.job_id)?;

        let row = EmployeeRow {
            id: next_id(&mut tables.sequences.employees),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone_number: draft.phone_number,
            date_of_birth: draft.date_of_birth,
            hire_date: draft.hire_date,
            department_id: draft.department_id,
            job_id: draft.job_id,
            is_active: draft.is_active,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };

        let record = tables.join(&row);

        tables.employees.insert(row.id, row);

        Ok(record)
    }

    async fn update_employee(
        &self,
        employee: EmployeeId,
        changes: EmployeeChanges,
    ) -> Result<Option<EmployeeRecord>, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.email_taken(&changes.email, Some(employee)) {
            return Err(StoreError::Conflict);
        }

        tables.check_references(changes.department_id, changes.job_id)?;

        let Some(row) = tables
            .employees
            .get_mut(&employee)
            .filter(|row| row.is_active)
        else {
            return Ok(None);
        };

        row.first_name = changes.first_name;
        row.last_name = changes.last_name;
        row.email = changes.email;
        row.phone_number = changes.phone_number;
        row.date_of_birth = changes.date_of_birth;
        row.hire_date = changes.hire_date;
        row.department_id = changes.department_id;
        row.job_id = changes.job_id;
        row.updated_at = changes.updated_at;

        let row = row.clone();

        Ok(Some(tables.join(&row)))
    }

    async fn deactivate_employee(
        &self,
        employee: EmployeeId,
        at: Timestamp,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;

        Ok(match tables.employees.get_mut(&employee) {
            Some(row) if row.is_active => {
                row.is_active = false;
                row.updated_at = at;
                true
            }
            _ => false,
        })
    }
}
