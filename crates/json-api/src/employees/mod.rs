//! Employees

mod dates;
mod errors;
mod handlers;

pub(crate) use handlers::*;
