//! Department Queries

use std::cmp::Ordering;

use crate::domain::{
    departments::records::DepartmentRecord,
    query::{
        Filter, Query, QueryParameters, SortKey, SortOrder, Window, cmp_folded, contains_folded,
    },
};

/// Department Filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentFilter {
    Active,

    /// Lower-cased substring of the name.
    NameContains(String),
}

impl Filter<DepartmentRecord> for DepartmentFilter {
    fn matches(&self, record: &DepartmentRecord) -> bool {
        match self {
            Self::Active => record.is_active,
            Self::NameContains(term) => contains_folded(&record.name, term),
        }
    }
}

/// Department Sort Key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentSortKey {
    Name,
    Id,
}

impl DepartmentSortKey {
    /// Departments can only be sorted by name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        value.eq_ignore_ascii_case("name").then_some(Self::Name)
    }
}

impl SortKey<DepartmentRecord> for DepartmentSortKey {
    fn compare(&self, a: &DepartmentRecord, b: &DepartmentRecord) -> Ordering {
        match self {
            Self::Name => cmp_folded(&a.name, &b.name),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Department Query
pub type DepartmentQuery = Query<DepartmentFilter, DepartmentSortKey>;

/// Compile list parameters into a department query over `window`.
///
/// Unknown sort keys fall back to the name order; the direction always applies.
#[must_use]
pub fn compile(params: &QueryParameters, window: Window) -> DepartmentQuery {
    let mut filters = vec![DepartmentFilter::Active];

    if let Some(term) = params.search() {
        filters.push(DepartmentFilter::NameContains(term));
    }

    let key = params
        .sort_by
        .as_deref()
        .and_then(DepartmentSortKey::parse)
        .unwrap_or(DepartmentSortKey::Name);

    Query {
        filters,
        order: vec![
            SortOrder::new(key, params.direction()),
            SortOrder::ascending(DepartmentSortKey::Id),
        ],
        window,
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::query::Direction;

    use super::*;

    #[test]
    fn compile_always_filters_inactive_records() {
        let query = compile(&QueryParameters::default(), Window::All);

        assert_eq!(query.filters, vec![DepartmentFilter::Active]);
    }

    #[test]
    fn compile_adds_folded_search_filter() {
        let params = QueryParameters {
            search_term: Some("FIN".to_string()),
            ..QueryParameters::default()
        };

        let query = compile(&params, Window::All);

        assert_eq!(
            query.filters,
            vec![
                DepartmentFilter::Active,
                DepartmentFilter::NameContains("fin".to_string())
            ]
        );
    }

    #[test]
    fn unknown_sort_key_falls_back_to_name_with_requested_direction() {
        let params = QueryParameters {
            sort_by: Some("salary".to_string()),
            sort_descending: true,
            ..QueryParameters::default()
        };

        let query = compile(&params, Window::All);

        assert_eq!(
            query.order,
            vec![
                SortOrder::new(DepartmentSortKey::Name, Direction::Descending),
                SortOrder::ascending(DepartmentSortKey::Id),
            ]
        );
    }

    #[test]
    fn sort_key_matching_ignores_case() {
        assert_eq!(DepartmentSortKey::parse("NaMe"), Some(DepartmentSortKey::Name));
        assert_eq!(DepartmentSortKey::parse("id"), None);
    }
}
