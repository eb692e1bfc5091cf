//! Employee Queries

use std::cmp::Ordering;

use jiff::civil::Date;

use crate::domain::{
    departments::records::DepartmentId,
    employees::records::EmployeeRecord,
    jobs::records::JobId,
    query::{
        Filter, Query, QueryParameters, SortKey, SortOrder, Window, cmp_folded, contains_folded,
    },
};

/// Employee list parameters: the common paging and sorting parameters plus
/// employee-only filters. Every filter is optional and independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQueryParameters {
    pub common: QueryParameters,
    pub department_id: Option<DepartmentId>,
    pub job_id: Option<JobId>,
    pub date_of_birth_from: Option<Date>,
    pub date_of_birth_to: Option<Date>,
    pub hire_date_from: Option<Date>,
    pub hire_date_to: Option<Date>,
}

/// Employee Filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    Active,

    /// Lower-cased term matched against first name, last name, email and phone number.
    Search(String),

    Department(DepartmentId),
    Job(JobId),
    BornOnOrAfter(Date),
    BornOnOrBefore(Date),
    HiredOnOrAfter(Date),
    HiredOnOrBefore(Date),
}

impl Filter<EmployeeRecord> for EmployeeFilter {
    fn matches(&self, record: &EmployeeRecord) -> bool {
        match self {
            Self::Active => record.is_active,
            Self::Search(term) => [
                &record.first_name,
                &record.last_name,
                &record.email,
                &record.phone_number,
            ]
            .into_iter()
            .any(|value| contains_folded(value, term)),
            Self::Department(department) => record.department_id == *department,
            Self::Job(job) => record.job_id == *job,
            Self::BornOnOrAfter(date) => record.date_of_birth >= *date,
            Self::BornOnOrBefore(date) => record.date_of_birth <= *date,
            Self::HiredOnOrAfter(date) => record.hire_date >= *date,
            Self::HiredOnOrBefore(date) => record.hire_date <= *date,
        }
    }
}

/// Employee Sort Key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSortKey {
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    HireDate,
    Department,
    Job,
    Id,
}

impl EmployeeSortKey {
    /// Match a caller supplied key, ignoring case. `None` for unknown keys.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "firstname" => Some(Self::FirstName),
            "lastname" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "dateofbirth" => Some(Self::DateOfBirth),
            "hiredate" => Some(Self::HireDate),
            "department" => Some(Self::Department),
            "job" => Some(Self::Job),
            _ => None,
        }
    }
}

impl SortKey<EmployeeRecord> for EmployeeSortKey {
    fn compare(&self, a: &EmployeeRecord, b: &EmployeeRecord) -> Ordering {
        match self {
            Self::FirstName => cmp_folded(&a.first_name, &b.first_name),
            Self::LastName => cmp_folded(&a.last_name, &b.last_name),
            Self::Email => cmp_folded(&a.email, &b.email),
            Self::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            Self::HireDate => a.hire_date.cmp(&b.hire_date),
            Self::Department => cmp_folded(&a.department_name, &b.department_name),
            Self::Job => cmp_folded(&a.job_name, &b.job_name),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Employee Query
pub type EmployeeQuery = Query<EmployeeFilter, EmployeeSortKey>;

/// Compile list parameters into an employee query over `window`.
///
/// Without a recognised sort key employees are ordered by last name, then
/// first name, in the requested direction.
#[must_use]
pub fn compile(params: &EmployeeQueryParameters, window: Window) -> EmployeeQuery {
    let mut filters = vec![EmployeeFilter::Active];

    filters.extend(params.common.search().map(EmployeeFilter::Search));
    filters.extend(params.department_id.map(EmployeeFilter::Department));
    filters.extend(params.job_id.map(EmployeeFilter::Job));
    filters.extend(params.date_of_birth_from.map(EmployeeFilter::BornOnOrAfter));
    filters.extend(params.date_of_birth_to.map(EmployeeFilter::BornOnOrBefore));
    filters.extend(params.hire_date_from.map(EmployeeFilter::HiredOnOrAfter));
    filters.extend(params.hire_date_to.map(EmployeeFilter::HiredOnOrBefore));

    let direction = params.common.direction();

    let mut order = match params
        .common
        .sort_by
        .as_deref()
        .and_then(EmployeeSortKey::parse)
    {
        Some(key) => vec![SortOrder::new(key, direction)],
        None => vec![
            SortOrder::new(EmployeeSortKey::LastName, direction),
            SortOrder::new(EmployeeSortKey::FirstName, direction),
        ],
    };

    order.push(SortOrder::ascending(EmployeeSortKey::Id));

    Query {
        filters,
        order,
        window,
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use crate::domain::query::Direction;

    use super::*;

    fn record(id: i64, first: &str, last: &str, department: &str) -> EmployeeRecord {
        EmployeeRecord {
            id: id.into(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone_number: format!("0101234567{id}"),
            date_of_birth: date(1990, 1, 1),
            hire_date: date(2020, 1, 1),
            department_id: DepartmentId::from_i64(1),
            department_name: department.to_string(),
            job_id: JobId::from_i64(1),
            job_name: "Developer".to_string(),
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn sort_keys_match_case_insensitively() {
        assert_eq!(EmployeeSortKey::parse("HireDate"), Some(EmployeeSortKey::HireDate));
        assert_eq!(EmployeeSortKey::parse("DEPARTMENT"), Some(EmployeeSortKey::Department));
        assert_eq!(EmployeeSortKey::parse("salary"), None);
    }

    #[test]
    fn default_order_is_last_then_first_name_then_id() {
        let query = compile(&EmployeeQueryParameters::default(), Window::All);

        assert_eq!(
            query.order,
            vec![
                SortOrder::ascending(EmployeeSortKey::LastName),
                SortOrder::ascending(EmployeeSortKey::FirstName),
                SortOrder::ascending(EmployeeSortKey::Id),
            ]
        );
    }

    #[test]
    fn explicit_key_uses_requested_direction() {
        let params = EmployeeQueryParameters {
            common: QueryParameters {
                sort_by: Some("job".to_string()),
                sort_descending: true,
                ..QueryParameters::default()
            },
            ..EmployeeQueryParameters::default()
        };

        let query = compile(&params, Window::All);

        assert_eq!(
            query.order,
            vec![
                SortOrder::new(EmployeeSortKey::Job, Direction::Descending),
                SortOrder::ascending(EmployeeSortKey::Id),
            ]
        );
    }

    #[test]
    fn every_supplied_filter_is_compiled() {
        let params = EmployeeQueryParameters {
            common: QueryParameters {
                search_term: Some("Ali".to_string()),
                ..QueryParameters::default()
            },
            department_id: Some(DepartmentId::from_i64(2)),
            job_id: Some(JobId::from_i64(3)),
            date_of_birth_from: Some(date(1980, 1, 1)),
            date_of_birth_to: None,
            hire_date_from: None,
            hire_date_to: Some(date(2024, 12, 31)),
        };

        let query = compile(&params, Window::All);

        assert_eq!(
            query.filters,
            vec![
                EmployeeFilter::Active,
                EmployeeFilter::Search("ali".to_string()),
                EmployeeFilter::Department(DepartmentId::from_i64(2)),
                EmployeeFilter::Job(JobId::from_i64(3)),
                EmployeeFilter::BornOnOrAfter(date(1980, 1, 1)),
                EmployeeFilter::HiredOnOrBefore(date(2024, 12, 31)),
            ]
        );
    }

    #[test]
    fn search_matches_any_text_column() {
        let employee = record(1, "Sara", "Nabil", "IT");

        for term in ["sar", "nab", "sara@", "01012"] {
            assert!(
                EmployeeFilter::Search(term.to_string()).matches(&employee),
                "{term} should match"
            );
        }

        assert!(!EmployeeFilter::Search("it".to_string()).matches(&employee));
    }

    #[test]
    fn date_ranges_are_inclusive() {
        let employee = record(1, "Sara", "Nabil", "IT");

        assert!(EmployeeFilter::BornOnOrAfter(date(1990, 1, 1)).matches(&employee));
        assert!(EmployeeFilter::BornOnOrBefore(date(1990, 1, 1)).matches(&employee));
        assert!(!EmployeeFilter::HiredOnOrAfter(date(2020, 1, 2)).matches(&employee));
    }

    #[test]
    fn text_keys_sort_ignoring_case() {
        let params = EmployeeQueryParameters {
            common: QueryParameters {
                sort_by: Some("department".to_string()),
                ..QueryParameters::default()
            },
            ..EmployeeQueryParameters::default()
        };

        let slice = compile(&params, Window::All).apply(vec![
            record(1, "Ali", "Zaki", "IT"),
            record(2, "Sara", "Nabil", "finance"),
            record(3, "Omar", "Hany", "HR"),
        ]);

        let departments: Vec<&str> = slice
            .records
            .iter()
            .map(|e| e.department_name.as_str())
            .collect();

        assert_eq!(departments, vec!["finance", "HR", "IT"]);
    }

    #[test]
    fn equal_names_fall_back_to_id_order() {
        let query = compile(&EmployeeQueryParameters::default(), Window::All);

        let slice = query.apply(vec![
            record(3, "Ali", "Zaki", "HR"),
            record(2, "Ali", "Amin", "IT"),
            record(1, "Ali", "Zaki", "IT"),
        ]);

        let ids: Vec<i64> = slice.records.iter().map(|e| e.id.into_i64()).collect();

        assert_eq!(ids, vec![2, 1, 3]);
    }
}
