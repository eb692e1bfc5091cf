//! Department Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Department Id
pub type DepartmentId = TypedId<DepartmentRecord>;

/// Department Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRecord {
    pub id: DepartmentId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values stored for a new department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDraft {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by an update. The activity flag and creation time are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentChanges {
    pub name: String,
    pub description: Option<String>,
    pub updated_at: Timestamp,
}
