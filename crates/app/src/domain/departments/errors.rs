//! Departments service errors.

use thiserror::Error;

use crate::{domain::validation::ValidationErrors, store::StoreError};

#[derive(Debug, Error)]
pub enum DepartmentsServiceError {
    #[error("invalid department data")]
    Invalid(#[from] ValidationErrors),

    #[error("department already exists")]
    AlreadyExists,

    #[error("department not found")]
    NotFound,

    #[error("department has active employees")]
    HasActiveEmployees,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for DepartmentsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::AlreadyExists,
            StoreError::MissingReference | StoreError::Sql(_) => Self::Store(error),
        }
    }
}
