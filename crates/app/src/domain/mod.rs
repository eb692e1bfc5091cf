//! Tamweely Domain Concerns

pub mod departments;
pub mod employees;
pub mod jobs;
pub mod query;
pub mod validation;
