//! Jobs service errors.

use thiserror::Error;

use crate::{domain::validation::ValidationErrors, store::StoreError};

#[derive(Debug, Error)]
pub enum JobsServiceError {
    #[error("invalid job data")]
    Invalid(#[from] ValidationErrors),

    #[error("job already exists")]
    AlreadyExists,

    #[error("job not found")]
    NotFound,

    #[error("job has active employees")]
    HasActiveEmployees,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for JobsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::AlreadyExists,
            StoreError::MissingReference | StoreError::Sql(_) => Self::Store(error),
        }
    }
}
