//! Test support

pub(crate) mod fixtures;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
