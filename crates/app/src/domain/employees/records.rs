//! Employee Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{departments::records::DepartmentId, jobs::records::JobId},
    ids::TypedId,
};

/// Employee Id
pub type EmployeeId = TypedId<EmployeeRecord>;

/// Employee Record, joined with its department name and job title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Date,
    pub hire_date: Date,
    pub department_id: DepartmentId,
    pub department_name: String,
    pub job_id: JobId,
    pub job_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EmployeeRecord {
    /// Calendar year difference between `today` and the date of birth.
    ///
    /// Birthdays later in the year are not taken into account.
    #[must_use]
    pub fn age(&self, today: Date) -> i16 {
        today.year() - self.date_of_birth.year()
    }
}

/// Values stored for a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Date,
    pub hire_date: Date,
    pub department_id: DepartmentId,
    pub job_id: JobId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by an employee update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Date,
    pub hire_date: Date,
    pub department_id: DepartmentId,
    pub job_id: JobId,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn age_ignores_month_and_day() {
        let employee = EmployeeRecord {
            id: EmployeeId::from_i64(1),
            first_name: "Mona".to_string(),
            last_name: "Adel".to_string(),
            email: "mona@example.com".to_string(),
            phone_number: "01012345678".to_string(),
            date_of_birth: date(1990, 12, 31),
            hire_date: date(2020, 1, 1),
            department_id: DepartmentId::from_i64(1),
            department_name: "IT".to_string(),
            job_id: JobId::from_i64(1),
            job_name: "Developer".to_string(),
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(employee.age(date(2026, 1, 1)), 36);
    }
}
