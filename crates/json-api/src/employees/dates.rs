//! Calendar date fields in requests and query strings.

use jiff::civil::Date;

use tamweely_app::domain::validation::ValidationErrors;

/// Parse a `YYYY-MM-DD` value. A trailing time of day (`1992-03-14T00:00:00`)
/// is accepted and ignored.
pub(crate) fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();
    let day = value.split_once('T').map_or(value, |(day, _)| day);

    day.parse().ok()
}

/// Parse a required date field, recording a field error when it is missing
/// or malformed.
pub(crate) fn required_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
) -> Option<Date> {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));

        return None;
    }

    let date = parse_date(value);

    if date.is_none() {
        errors.add(field, format!("{label} must be a date in YYYY-MM-DD format"));
    }

    date
}

/// Parse an optional date filter. Blank values mean no filter.
pub(crate) fn optional_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<Date> {
    let value = value.filter(|value| !value.trim().is_empty())?;
    let date = parse_date(value);

    if date.is_none() {
        errors.add(field, "Must be a date in YYYY-MM-DD format");
    }

    date
}
