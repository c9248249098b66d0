//! Unit tests for the storage module

#[cfg(test)]
pub mod file_store_tests;
