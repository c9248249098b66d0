//! Token persistence
//!
//! `FileTokenStore` keeps the authoritative token map in memory and rewrites a
//! JSON snapshot of it after every mutation.

pub mod file_store;

pub use file_store::FileTokenStore;

#[cfg(test)]
mod tests;
