//! Departments in PostgreSQL.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        departments::{
            DepartmentsRepository,
            query::{DepartmentFilter, DepartmentQuery, DepartmentSortKey},
            records::{DepartmentChanges, DepartmentDraft, DepartmentId, DepartmentRecord},
        },
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

const SELECT_DEPARTMENTS_SQL: &str = include_str!("sql/select_departments.sql");
const COUNT_DEPARTMENTS_SQL: &str = include_str!("sql/count_departments.sql");
const GET_DEPARTMENT_SQL: &str = include_str!("sql/get_department.sql");
const DEPARTMENT_NAME_TAKEN_SQL: &str = include_str!("sql/department_name_taken.sql");
const INSERT_DEPARTMENT_SQL: &str = include_str!("sql/insert_department.sql");
const UPDATE_DEPARTMENT_SQL: &str = include_str!("sql/update_department.sql");
const DEACTIVATE_DEPARTMENT_SQL: &str = include_str!("sql/deactivate_department.sql");

impl SqlFilter for DepartmentFilter {
    fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Active => {
                builder.push("is_active");
            }
            Self::NameContains(term) => push_contains(builder, "name", term),
        }
    }
}

impl SqlSortKey for DepartmentSortKey {
    fn expressions(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["lower(name) COLLATE \"C\"", "name COLLATE \"C\""],
            Self::Id => &["id"],
        }
    }
}

#[async_trait]
impl DepartmentsRepository for PgStore {
    #[tracing::instrument(name = "departments.store.find", skip_all, err)]
    async fn find_departments(
        &self,
        query: &DepartmentQuery,
    ) -> Result<Slice<DepartmentRecord>, StoreError> {
        let mut select = QueryBuilder::<Postgres>::new(SELECT_DEPARTMENTS_SQL);

        push_filters(&mut select, &query.filters);
        push_order(&mut select, &query.order);
        push_window(&mut select, query.window);

        let mut count = QueryBuilder::<Postgres>::new(COUNT_DEPARTMENTS_SQL);

        push_filters(&mut count, &query.filters);

        let records = select
            .build_query_as::<DepartmentRecord>()
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Slice {
            records,
            total: into_total(total),
        })
    }

    async fn get_department(
        &self,
        department: DepartmentId,
    ) -> Result<Option<DepartmentRecord>, StoreError> {
        Ok(query_as::<Postgres, DepartmentRecord>(GET_DEPARTMENT_SQL)
            .bind(department.into_i64())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn department_name_taken(
        &self,
        name: &str,
        excluding: Option<DepartmentId>,
    ) -> Result<bool, StoreError> {
        Ok(query_scalar(DEPARTMENT_NAME_TAKEN_SQL)
            .bind(name)
            .bind(excluding.map(DepartmentId::into_i64))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_department(
        &self,
        draft: DepartmentDraft,
    ) -> Result<DepartmentRecord, StoreError> {
        Ok(query_as::<Postgres, DepartmentRecord>(INSERT_DEPARTMENT_SQL)
            .bind(draft.name)
            .bind(draft.description)
            .bind(draft.is_active)
            .bind(SqlxTimestamp::from(draft.created_at))
            .bind(SqlxTimestamp::from(draft.updated_at))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_department(
        &self,
        department: DepartmentId,
        changes: DepartmentChanges,
    ) -> Result<Option<DepartmentRecord>, StoreError> {
        Ok(query_as::<Postgres, DepartmentRecord>(UPDATE_DEPARTMENT_SQL)
            .bind(department.into_i64())
            .bind(changes.name)
            .bind(changes.description)
            .bind(SqlxTimestamp::from(changes.updated_at))
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn deactivate_department(
        &self,
        department: DepartmentId,
        at: Timestamp,
    ) -> Result<bool, StoreError> {
        let rows_affected = query(DEACTIVATE_DEPARTMENT_SQL)
            .bind(department.into_i64())
            .bind(SqlxTimestamp::from(at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for DepartmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: DepartmentId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::query::{QueryParameters, Window},
        domain::departments::query::compile,
        test::TestDb,
    };

    use super::*;

    fn draft(name: &str) -> DepartmentDraft {
        DepartmentDraft {
            name: name.to_string(),
            description: Some("Reference".to_string()),
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn partial_unique_index_rejects_active_duplicates_only() -> TestResult {
        let db = TestDb::new().await;
        let store = PgStore::new(db.pool.clone());

        let finance = store.insert_department(draft("Finance")).await?;

        let duplicate = store.insert_department(draft("FINANCE")).await;

        assert!(
            matches!(duplicate, Err(StoreError::Conflict)),
            "expected Conflict, got {duplicate:?}"
        );

        assert!(store.deactivate_department(finance.id, Timestamp::UNIX_EPOCH).await?);

        store.insert_department(draft("finance")).await?;

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn find_searches_sorts_and_counts() -> TestResult {
        let db = TestDb::new().await;
        let store = PgStore::new(db.pool.clone());

        for name in ["Finance", "field", "IT", "Facilities"] {
            store.insert_department(draft(name)).await?;
        }

        let params = QueryParameters {
            search_term: Some("F".to_string()),
            ..QueryParameters::default()
        };

        let slice = store
            .find_departments(&compile(&params, Window::Page { offset: 0, limit: 2 }))
            .await?;

        assert_eq!(slice.total, 3);
        assert_eq!(
            slice.records.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["Facilities", "field"]
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn update_skips_inactive_rows() -> TestResult {
        let db = TestDb::new().await;
        let store = PgStore::new(db.pool.clone());

        let it = store.insert_department(draft("IT")).await?;
        store.deactivate_department(it.id, Timestamp::UNIX_EPOCH).await?;

        let updated = store
            .update_department(
                it.id,
                DepartmentChanges {
                    name: "Engineering".to_string(),
                    description: None,
                    updated_at: Timestamp::UNIX_EPOCH,
                },
            )
            .await?;

        assert_eq!(updated, None);
        assert!(!store.department_name_taken("it", None).await?);

        Ok(())
    }
}
