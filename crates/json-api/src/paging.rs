//! List query parameters shared by every index handler.

use salvo::prelude::*;
use serde::Deserialize;

use tamweely_app::domain::query::{DEFAULT_PAGE_SIZE, QueryParameters};

use crate::extensions::*;

/// `?pageNumber=&pageSize=&searchTerm=&sortBy=&sortDescending=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ListQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub sort_descending: Option<bool>,
}

impl From<ListQuery> for QueryParameters {
    fn from(query: ListQuery) -> Self {
        QueryParameters {
            page_number: query.page_number.unwrap_or(1),
            page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            search_term: query.search_term,
            sort_by: query.sort_by,
            sort_descending: query.sort_descending.unwrap_or(false),
        }
    }
}

/// Read the common list parameters from the query string.
pub(crate) fn list_parameters(req: &mut Request) -> Result<QueryParameters, StatusError> {
    req.parse_queries::<ListQuery>()
        .or_400("could not parse list query parameters")
        .map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_fall_back_to_defaults() {
        let params = QueryParameters::from(ListQuery::default());

        assert_eq!(params, QueryParameters::default());
    }

    #[test]
    fn supplied_parameters_are_kept() {
        let params = QueryParameters::from(ListQuery {
            page_number: Some(3),
            page_size: Some(500),
            search_term: Some("fin".to_string()),
            sort_by: Some("name".to_string()),
            sort_descending: Some(true),
        });

        assert_eq!(params.page_number, 3);
        assert_eq!(params.page_size, 500, "clamping happens in the query engine");
        assert_eq!(params.search_term.as_deref(), Some("fin"));
        assert!(params.sort_descending, "expected descending order");
    }
}
