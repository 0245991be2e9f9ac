//! Shared test infrastructure

pub mod database;
pub mod fixtures;
pub mod upstream;
