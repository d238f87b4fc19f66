// Integration tests for migrate-fixtures

pub mod helpers;
pub mod integration;
