//! Department Data

use jiff::Timestamp;

use crate::domain::{
    departments::records::{DepartmentChanges, DepartmentDraft, DepartmentId},
    validation::{Description, RequiredText, ValidationErrors, Validator, positive_id, trim_optional},
};

const NAME: RequiredText = RequiredText {
    field: "name",
    max_chars: 100,
    required: "Department name is required",
    too_long: "Department name cannot exceed 100 characters",
};

/// New Department Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
    pub description: Option<String>,
}

impl NewDepartment {
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            description: trim_optional(self.description),
        }
    }

    /// New departments always start active, created and updated now.
    pub(crate) fn into_draft(self, now: Timestamp) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name,
            description: self.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn into_changes(self, now: Timestamp) -> DepartmentChanges {
        DepartmentChanges {
            name: self.name,
            description: self.description,
            updated_at: now,
        }
    }
}

/// Department Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentUpdate {
    pub id: DepartmentId,
    pub department: NewDepartment,
}

impl DepartmentUpdate {
    #[must_use]
    pub(crate) fn normalized(self) -> Self {
        Self {
            id: self.id,
            department: self.department.normalized(),
        }
    }
}

/// Rules for creating a department.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewDepartmentValidator;

impl Validator<NewDepartment> for NewDepartmentValidator {
    fn check(&self, value: &NewDepartment, errors: &mut ValidationErrors) {
        NAME.check(&value.name, errors);
        Description.check(&value.description, errors);
    }
}

/// Rules for updating a department: the create rules plus a valid id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentUpdateValidator;

impl Validator<DepartmentUpdate> for DepartmentUpdateValidator {
    fn check(&self, value: &DepartmentUpdate, errors: &mut ValidationErrors) {
        NewDepartmentValidator.check(&value.department, errors);
        positive_id(errors, "id", value.id, "Invalid department ID");
    }
}
