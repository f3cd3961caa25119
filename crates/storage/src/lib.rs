//! Storage abstraction and implementations for studytrack.
//!
//! This crate provides a trait-based storage interface with a file-backed
//! JSON implementation and an in-memory implementation for tests and
//! ephemeral runs.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
