//! Shared HR records domain and persistence modules.

pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod seed;
pub mod store;

#[cfg(test)]
mod test;
