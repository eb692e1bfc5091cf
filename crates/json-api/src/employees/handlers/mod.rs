//! Employee Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod export;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;
