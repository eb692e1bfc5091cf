//! Departments

pub mod data;
pub mod errors;
pub mod query;
pub mod records;
mod repository;
pub mod service;

pub use errors::DepartmentsServiceError;
pub use repository::*;
pub use service::*;
