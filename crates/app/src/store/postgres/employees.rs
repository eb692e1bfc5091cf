//! Employees in PostgreSQL.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        departments::records::DepartmentId,
        employees::{
            EmployeesRepository,
            query::{EmployeeFilter, EmployeeQuery, EmployeeSortKey},
            records::{EmployeeChanges, EmployeeDraft, EmployeeId, EmployeeRecord},
        },
        jobs::records::JobId,
        query::Slice,
    },
    store::{
        StoreError,
        postgres::{
            PgStore, SqlFilter, SqlSortKey, into_total, push_contains, push_filters, push_order,
            push_window,
        },
    },
};

const SELECT_EMPLOYEES_SQL: &str = include_str!("sql/select_employees.sql");
const COUNT_EMPLOYEES_SQL: &str = include_str!("sql/count_employees.sql");
const GET_EMPLOYEE_SQL: &str = include_str!("sql/get_employee.sql");
const EMAIL_TAKEN_SQL: &str = include_str!("sql/email_taken.sql");
const ANY_ACTIVE_IN_DEPARTMENT_SQL: &str = include_str!("sql/any_active_in_department.sql");
const ANY_ACTIVE_IN_JOB_SQL: &str = include_str!("sql/any_active_in_job.sql");
const INSERT_EMPLOYEE_SQL: &str = include_str!("sql/insert_employee.sql");
const UPDATE_EMPLOYEE_SQL: &str = include_str!("sql/update_employee.sql");
const DEACTIVATE_EMPLOYEE_SQL: &str = include_str!("sql/deactivate_employee.sql");

impl SqlFilter for EmployeeFilter {
    fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Active => {
                builder.push("e.is_active");
            }
            Self::Search(term) => {
                builder.push("(");
                push_contains(builder, "e.first_name", term);
                builder.push(" OR ");
                push_contains(builder, "e.last_name", term);
                builder.push(" OR ");
                push_contains(builder, "e.email", term);
                builder.push(" OR ");
                push_contains(builder, "e.phone_number", term);
                builder.push(")");
            }
            Self::Department(department) => {
                builder.push("e.department_id = ").push_bind(department.into_i64());
            }
            Self::Job(job) => {
                builder.push("e.job_id = ").push_bind(job.into_i64());
            }
            Self::BornOnOrAfter(date) => {
                builder.push("e.date_of_birth >= ").push_bind(SqlxDate::from(*date));
            }
            Self::BornOnOrBefore(date) => {
                builder.push("e.date_of_birth <= ").push_bind(SqlxDate::from(*date));
            }
            Self::HiredOnOrAfter(date) => {
                builder.push("e.hire_date >= ").push_bind(SqlxDate::from(*date));
            }
            Self::HiredOnOrBefore(date) => {
                builder.push("e.hire_date <= ").push_bind(SqlxDate::from(*date));
            }
        }
    }
}

impl SqlSortKey for EmployeeSortKey {
    fn expressions(&self) -> &'static [&'static str] {
        match self {
            Self::FirstName => &["lower(e.first_name) COLLATE \"C\"", "e.first_name COLLATE \"C\""],
            Self::LastName => &["lower(e.last_name) COLLATE \"C\"", "e.last_name COLLATE \"C\""],
            Self::Email => &["lower(e.email) COLLATE \"C\"", "e.email COLLATE \"C\""],
            Self::DateOfBirth => &["e.date_of_birth"],
            Self::HireDate => &["e.hire_date"],
            Self::Department => &["lower(d.name) COLLATE \"C\"", "d.name COLLATE \"C\""],
            Self::Job => &["lower(j.title) COLLATE \"C\"", "j.title COLLATE \"C\""],
            Self::Id => &["e.id"],
        }
    }
}

#[async_trait]
impl EmployeesRepository for PgStore {
    #[tracing::instrument(name = "employees.store.find", skip_all, err)]
    async fn find_employees(
        &self,
        query: &EmployeeQuery,
    ) -> Result<Slice<EmployeeRecord>, StoreError> {
        let mut select = QueryBuilder::<Postgres>::new(SELECT_EMPLOYEES_SQL);

        push_filters(&mut select, &query.filters);
        push_order(&mut select, &query.order);
        push_window(&mut select, query.window);

        let records = select
            .build_query_as::<EmployeeRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(Slice {
            records,
            total: self.count_employees(query).await?,
        })
    }

    async fn count_employees(&self, query: &EmployeeQuery) -> Result<u64, StoreError> {
        let mut count = QueryBuilder::<Postgres>::new(COUNT_EMPLOYEES_SQL);

        push_filters(&mut count, &query.filters);

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(into_total(total))
    }

    async fn get_employee(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<EmployeeRecord>, StoreError> {
        Ok(query_as::<Postgres, EmployeeRecord>(GET_EMPLOYEE_SQL)
            .bind(employee.into_i64())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, StoreError> {
        Ok(query_scalar(EMAIL_TAKEN_SQL)
            .bind(email)
            .bind(excluding.map(EmployeeId::into_i64))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn any_active_in_department(&self, department: DepartmentId) -> Result<bool, StoreError> {
        Ok(query_scalar(ANY_ACTIVE_IN_DEPARTMENT_SQL)
            .bind(department.into_i64())
            .fetch_one(&self.pool)
            .await?)
    }

    async fn any_active_in_job(&self, job: JobId) -> Result<bool, StoreError> {
        Ok(query_scalar(ANY_ACTIVE_IN_JOB_SQL)
            .bind(job.into_i64())
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_employee(&self, draft: EmployeeDraft) -> Result<EmployeeRecord, StoreError> {
        Ok(query_as::<Postgres, EmployeeRecord>(INSERT_EMPLOYEE_SQL)
            .bind(draft.first_name)
            .bind(draft.last_name)
            .bind(draft.email)
            .bind(draft.phone_number)
            .bind(SqlxDate::from(draft.date_of_birth))
            .bind(SqlxDate::from(draft.hire_date))
            .bind(draft.department_id.into_i64())
            .bind(draft.job_id.into_i64())
            .bind(draft.is_active)
            .bind(SqlxTimestamp::from(draft.created_at))
            .bind(SqlxTimestamp::from(draft.updated_at))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_employee(
        &self,
        employee: EmployeeId,
        changes: EmployeeChanges,
    ) -> Result<Option<EmployeeRecord>, StoreError> {
        Ok(query_as::<Postgres, EmployeeRecord>(UPDATE_EMPLOYEE_SQL)
            .bind(employee.into_i64())
            .bind(changes.first_name)
            .bind(changes.last_name)
            .bind(changes.email)
            .bind(changes.phone_number)
            .bind(SqlxDate::from(changes.date_of_birth))
            .bind(SqlxDate::from(changes.hire_date))
            .bind(changes.department_id.into_i64())
            .bind(changes.job_id.into_i64())
            .bind(SqlxTimestamp::from(changes.updated_at))
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn deactivate_employee(
        &self,
        employee: EmployeeId,
        at: Timestamp,
    ) -> Result<bool, StoreError> {
        let rows_affected = query(DEACTIVATE_EMPLOYEE_SQL)
            .bind(employee.into_i64())
            .bind(SqlxTimestamp::from(at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for EmployeeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: EmployeeId::from_i64(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone_number: row.try_get("phone_number")?,
            date_of_birth: row.try_get::<SqlxDate, _>("date_of_birth")?.to_jiff(),
            hire_date: row.try_get::<SqlxDate, _>("hire_date")?.to_jiff(),
            department_id: DepartmentId::from_i64(row.try_get("department_id")?),
            department_name: row.try_get("department_name")?,
            job_id: JobId::from_i64(row.try_get("job_id")?),
            job_name: row.try_get("job_name")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::{
            departments::{DepartmentsRepository, records::DepartmentDraft},
            employees::query::{EmployeeQueryParameters, compile},
            jobs::{JobsRepository, records::JobDraft},
            query::{QueryParameters, Window},
        },
        test::TestDb,
    };

    use super::*;

    async fn seed(store: &PgStore) -> Result<(DepartmentId, JobId), StoreError> {
        let department = store
            .insert_department(DepartmentDraft {
                name: "IT".to_string(),
                description: None,
                is_active: true,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
            .await?;

        let job = store
            .insert_job(JobDraft {
                title: "Developer".to_string(),
                description: None,
                is_active: true,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
            .await?;

        Ok((department.id, job.id))
    }

    fn draft(first: &str, last: &str, department: DepartmentId, job: JobId) -> EmployeeDraft {
        EmployeeDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
            phone_number: "01234567890".to_string(),
            date_of_birth: date(1990, 6, 15),
            hire_date: date(2021, 1, 10),
            department_id: department,
            job_id: job,
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn inserted_employee_is_joined_with_names() -> TestResult {
        let db = TestDb::new().await;
        let store = PgStore::new(db.pool.clone());
        let (department, job) = seed(&store).await?;

        let created = store.insert_employee(draft("Rana", "Aziz", department, job)).await?;

        assert_eq!(created.department_name, "IT");
        assert_eq!(created.job_name, "Developer");
        assert_eq!(created.date_of_birth, date(1990, 6, 15));
        assert!(store.any_active_in_department(department).await?);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn unknown_department_is_a_missing_reference() -> TestResult {
        let db = TestDb::new().await;
        let store = PgStore::new(db.pool.clone());
        let (_, job) = seed(&store).await?;

        let result = store
            .insert_employee(draft("Rana", "Aziz", DepartmentId::from_i64(404), job))
            .await;

        assert!(
            matches!(result, Err(StoreError::MissingReference)),
            "expected MissingReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn default_order_and_search_agree_with_memory_store() -> TestResult {
        let db = TestDb::new().await;
        let store = PgStore::new(db.pool.clone());
        let (department, job) = seed(&store).await?;

        for (first, last) in [("zoe", "Adel"), ("Amr", "Adel"), ("Bassem", "adel")] {
            store.insert_employee(draft(first, last, department, job)).await?;
        }

        let params = EmployeeQueryParameters {
            common: QueryParameters {
                search_term: Some("ADEL".to_string()),
                ..QueryParameters::default()
            },
            ..EmployeeQueryParameters::default()
        };

        let slice = store.find_employees(&compile(&params, Window::All)).await?;

        assert_eq!(
            slice.records.iter().map(|e| e.first_name.as_str()).collect::<Vec<_>>(),
            vec!["Amr", "zoe", "Bassem"]
        );
        assert_eq!(slice.total, 3);

        Ok(())
    }
}
