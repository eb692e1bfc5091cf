//! Authentication

mod claims;
pub(crate) mod middleware;
mod tokens;

pub(crate) use claims::*;
pub(crate) use tokens::*;
