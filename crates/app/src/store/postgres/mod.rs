//! PostgreSQL record store.
//!
//! Compiled queries become a filtered `SELECT` plus a separate `count(*)`
//! over the same filters. Text keys sort on `lower(...)` and then on the exact
//! value, both with the `"C"` collation, so rows come back in the same order the
//! in-memory store produces.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::query::{SortOrder, Window};

mod departments;
mod employees;
mod jobs;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A filter that can be rendered as a SQL predicate.
trait SqlFilter {
    fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>);
}

/// A sort key that maps to one or more SQL ordering expressions sharing a direction.
trait SqlSortKey {
    fn expressions(&self) -> &'static [&'static str];
}

/// Append `WHERE` with every filter joined by `AND`.
fn push_filters<F: SqlFilter>(builder: &mut QueryBuilder<'_, Postgres>, filters: &[F]) {
    builder.push(" WHERE TRUE");

    for filter in filters {
        builder.push(" AND ");
        filter.push_predicate(builder);
    }
}

fn push_order<K: SqlSortKey>(builder: &mut QueryBuilder<'_, Postgres>, order: &[SortOrder<K>]) {
    let mut separated = builder.separated(", ");

    separated.push_unseparated(" ORDER BY ");

    for sort in order {
        for expression in sort.key.expressions() {
            separated.push(format_args!("{expression} {}", sort.direction.as_sql()));
        }
    }
}

fn push_window(builder: &mut QueryBuilder<'_, Postgres>, window: Window) {
    if let Window::Page { offset, limit } = window {
        builder
            .push(" LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
    }
}

/// Case-insensitive substring test of `column` against an already lower-cased term.
fn push_contains(builder: &mut QueryBuilder<'_, Postgres>, column: &str, term: &str) {
    builder
        .push("strpos(lower(")
        .push(column)
        .push("), ")
        .push_bind(term.to_owned())
        .push(") > 0");
}

/// `count(*)` results are never negative.
fn into_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
