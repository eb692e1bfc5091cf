//! Record Store implementations

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failure raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An active record already holds a value that must be unique.
    #[error("unique constraint violated")]
    Conflict,

    /// A foreign key points at a record that does not exist.
    #[error("referenced record does not exist")]
    MissingReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::MissingReference,
            _ => Self::Sql(error),
        }
    }
}
