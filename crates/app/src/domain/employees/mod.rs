//! Employees

pub mod data;
pub mod errors;
pub mod export;
pub mod query;
pub mod records;
mod repository;
pub mod service;

pub use errors::{EmployeesServiceError, Reference};
pub use repository::*;
pub use service::*;
