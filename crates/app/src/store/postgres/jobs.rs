//! Jobs in PostgreSQL.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        jobs::{
            JobsRepository,
            query::{JobFilter, JobQuery, JobSortKey},
            records::{JobChanges, JobDraft, JobId, JobRecord},
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

const SELECT_JOBS_SQL: &str = include_str!("sql/select_jobs.sql");
const COUNT_JOBS_SQL: &str = include_str!("sql/count_jobs.sql");
const GET_JOB_SQL: &str = include_str!("sql/get_job.sql");
const JOB_TITLE_TAKEN_SQL: &str = include_str!("sql/job_title_taken.sql");
const INSERT_JOB_SQL: &str = include_str!("sql/insert_job.sql");
const UPDATE_JOB_SQL: &str = include_str!("sql/update_job.sql");
const DEACTIVATE_JOB_SQL: &str = include_str!("sql/deactivate_job.sql");

impl SqlFilter for JobFilter {
    fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Active => {
                builder.push("is_active");
            }
            Self::TitleContains(term) => push_contains(builder, "title", term),
        }
    }
}

impl SqlSortKey for JobSortKey {
    fn expressions(&self) -> &'static [&'static str] {
        match self {
            Self::Title => &["lower(title) COLLATE \"C\"", "title COLLATE \"C\""],
            Self::Id => &["id"],
        }
    }
}

#[async_trait]
impl JobsRepository for PgStore {
    #[tracing::instrument(name = "jobs.store.find", skip_all, err)]
    async fn find_jobs(
        &self,
        query: &JobQuery,
    ) -> Result<Slice<JobRecord>, StoreError> {
        let mut select = QueryBuilder::<Postgres>::new(SELECT_JOBS_SQL);

        push_filters(&mut select, &query.filters);
        push_order(&mut select, &query.order);
        push_window(&mut select, query.window);

        let mut count = QueryBuilder::<Postgres>::new(COUNT_JOBS_SQL);

        push_filters(&mut count, &query.filters);

        let records = select
            .build_query_as::<JobRecord>()
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(Slice {
            records,
            total: into_total(total),
        })
    }

    async fn get_job(
        &self,
        job: JobId,
    ) -> Result<Option<JobRecord>, StoreError> {
        Ok(query_as::<Postgres, JobRecord>(GET_JOB_SQL)
            .bind(job.into_i64())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn job_title_taken(
        &self,
        title: &str,
        excluding: Option<JobId>,
    ) -> Result<bool, StoreError> {
        Ok(query_scalar(JOB_TITLE_TAKEN_SQL)
            .bind(title)
            .bind(excluding.map(JobId::into_i64))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_job(
        &self,
        draft: JobDraft,
    ) -> Result<JobRecord, StoreError> {
        Ok(query_as::<Postgres, JobRecord>(INSERT_JOB_SQL)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.is_active)
            .bind(SqlxTimestamp::from(draft.created_at))
            .bind(SqlxTimestamp::from(draft.updated_at))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_job(
        &self,
        job: JobId,
        changes: JobChanges,
    ) -> Result<Option<JobRecord>, StoreError> {
        Ok(query_as::<Postgres, JobRecord>(UPDATE_JOB_SQL)
            .bind(job.into_i64())
            .bind(changes.title)
            .bind(changes.description)
            .bind(SqlxTimestamp::from(changes.updated_at))
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn deactivate_job(
        &self,
        job: JobId,
        at: Timestamp,
    ) -> Result<bool, StoreError> {
        let rows_affected = query(DEACTIVATE_JOB_SQL)
            .bind(job.into_i64())
            .bind(SqlxTimestamp::from(at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for JobRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: JobId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
