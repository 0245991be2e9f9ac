//! Storage layer for the gateway

pub mod database;

pub use database::Database;
