//! Job Queries

use std::cmp::Ordering;

use crate::domain::{
    jobs::records::JobRecord,
    query::{
        Filter, Query, QueryParameters, SortKey, SortOrder, Window, cmp_folded, contains_folded,
    },
};

/// Job Filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFilter {
    Active,

    /// Lower-cased substring of the title.
    TitleContains(String),
}

impl Filter<JobRecord> for JobFilter {
    fn matches(&self, record: &JobRecord) -> bool {
        match self {
            Self::Active => record.is_active,
            Self::TitleContains(term) => contains_folded(&record.title, term),
        }
    }
}

/// Job Sort Key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSortKey {
    Title,
    Id,
}

impl JobSortKey {
    /// Jobs can only be sorted by title.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        value.eq_ignore_ascii_case("title").then_some(Self::Title)
    }
}

impl SortKey<JobRecord> for JobSortKey {
    fn compare(&self, a: &JobRecord, b: &JobRecord) -> Ordering {
        match self {
            Self::Title => cmp_folded(&a.title, &b.title),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Job Query
pub type JobQuery = Query<JobFilter, JobSortKey>;

/// Compile list parameters into a job query over `window`.
///
/// Unknown sort keys fall back to the title order; the direction always applies.
#[must_use]
pub fn compile(params: &QueryParameters, window: Window) -> JobQuery {
    let mut filters = vec![JobFilter::Active];

    if let Some(term) = params.search() {
        filters.push(JobFilter::TitleContains(term));
    }

    let key = params
        .sort_by
        .as_deref()
        .and_then(JobSortKey::parse)
        .unwrap_or(JobSortKey::Title);

    Query {
        filters,
        order: vec![
            SortOrder::new(key, params.direction()),
            SortOrder::ascending(JobSortKey::Id),
        ],
        window,
    }
}
