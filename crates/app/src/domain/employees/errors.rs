//! Employees service errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::{domain::validation::ValidationErrors, store::StoreError};

/// The record an employee refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Department,
    Job,
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Department => "department",
            Self::Job => "job",
        })
    }
}

#[derive(Debug, Error)]
pub enum EmployeesServiceError {
    #[error("invalid employee data")]
    Invalid(#[from] ValidationErrors),

    #[error("employee already exists")]
    AlreadyExists,

    #[error("employee not found")]
    NotFound,

    #[error("{0} not found")]
    InvalidReference(Reference),

    #[error("export of {matching} employees exceeds the limit of {limit}")]
    ExportTooLarge { matching: u64, limit: u64 },

    #[error("failed to write export")]
    Export(#[source] XlsxError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for EmployeesServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::AlreadyExists,
            StoreError::MissingReference | StoreError::Sql(_) => Self::Store(error),
        }
    }
}

impl From<XlsxError> for EmployeesServiceError {
    fn from(error: XlsxError) -> Self {
        Self::Export(error)
    }
}
