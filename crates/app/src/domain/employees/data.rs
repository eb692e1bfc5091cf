//! Employee Data

use std::sync::LazyLock;

use jiff::{Timestamp, ToSpan, civil::Date};
use regex::Regex;

use crate::domain::{
    departments::records::DepartmentId,
    employees::records::{EmployeeChanges, EmployeeDraft, EmployeeId},
    jobs::records::JobId,
    validation::{Email, RequiredText, ValidationErrors, Validator, positive_id},
};

/// Employees must be younger than this many years.
pub const MAX_AGE_YEARS: i16 = 65;

const FIRST_NAME: RequiredText = RequiredText {
    field: "firstName",
    max_chars: 100,
    required: "First name is required",
    too_long: "First name cannot exceed 100 characters",
};

const LAST_NAME: RequiredText = RequiredText {
    field: "lastName",
    max_chars: 100,
    required: "Last name is required",
    too_long: "Last name cannot exceed 100 characters",
};

/// Eleven digit Egyptian mobile number.
const PHONE_NUMBER_PATTERN: &str = "^01[0-25][0-9]{8}$";

#[expect(clippy::expect_used, reason = "Pattern is a literal")]
fn phone_number_regex() -> Regex {
    Regex::new(PHONE_NUMBER_PATTERN).expect("phone number pattern should compile")
}

static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(phone_number_regex);

/// New Employee Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Date,
    pub hire_date: Date,
    pub department_id: DepartmentId,
    pub job_id: JobId,
}

impl NewEmployee {
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone_number: self.phone_number.trim().to_owned(),
            ..self
        }
    }

    /// The fields whose rules do not depend on the calendar.
    #[must_use]
    pub fn details(&self) -> EmployeeDetails<'_> {
        EmployeeDetails {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            phone_number: &self.phone_number,
            department_id: self.department_id,
            job_id: self.job_id,
        }
    }

    pub(crate) fn into_draft(self, now: Timestamp) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            hire_date: self.hire_date,
            department_id: self.department_id,
            job_id: self.job_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn into_changes(self, now: Timestamp) -> EmployeeChanges {
        EmployeeChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            hire_date: self.hire_date,
            department_id: self.department_id,
            job_id: self.job_id,
            updated_at: now,
        }
    }
}

/// Employee Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub id: EmployeeId,
    pub employee: NewEmployee,
}

impl EmployeeUpdate {
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            id: self.id,
            employee: self.employee.normalized(),
        }
    }
}

/// The date-independent fields of an employee payload.
///
/// Callers that cannot parse the dates of a payload still check these so every
/// field error is reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeDetails<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub department_id: DepartmentId,
    pub job_id: JobId,
}

/// Rules for the date-independent fields of an employee.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeDetailsValidator;

impl Validator<EmployeeDetails<'_>> for EmployeeDetailsValidator {
    fn check(&self, value: &EmployeeDetails<'_>, errors: &mut ValidationErrors) {
        FIRST_NAME.check(value.first_name, errors);
        LAST_NAME.check(value.last_name, errors);
        Email.check(value.email.trim(), errors);

        let phone_number = value.phone_number.trim();

        if phone_number.is_empty() {
            errors.add("phoneNumber", "Mobile is required");
        } else if !PHONE_NUMBER.is_match(phone_number) {
            errors.add(
                "phoneNumber",
                "Invalid Egyptian mobile format. Must be 11 digits starting with 01",
            );
        }

        positive_id(errors, "departmentId", value.department_id, "Department is required");
        positive_id(errors, "jobId", value.job_id, "Job title is required");
    }
}

/// Rules for creating an employee, evaluated against `today`.
#[derive(Debug, Clone, Copy)]
pub struct NewEmployeeValidator {
    pub today: Date,
}

impl Validator<NewEmployee> for NewEmployeeValidator {
    fn check(&self, value: &NewEmployee, errors: &mut ValidationErrors) {
        EmployeeDetailsValidator.check(&value.details(), errors);

        if value.hire_date > self.today {
            errors.add("hireDate", "Hire date cannot be in the future");
        }

        if value.date_of_birth >= self.today {
            errors.add("dateOfBirth", "Date of birth must be in the past");
        } else if self
            .today
            .checked_sub(MAX_AGE_YEARS.years())
            .is_ok_and(|limit| value.date_of_birth <= limit)
        {
            errors.add("dateOfBirth", "Employee must be younger than 65 years old");
        }
    }
}

/// Rules for updating an employee: the create rules plus a valid id.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeUpdateValidator {
    pub today: Date,
}

impl Validator<EmployeeUpdate> for EmployeeUpdateValidator {
    fn check(&self, value: &EmployeeUpdate, errors: &mut ValidationErrors) {
        NewEmployeeValidator { today: self.today }.check(&value.employee, errors);
        positive_id(errors, "id", value.id, "Invalid employee ID");
    }
}
