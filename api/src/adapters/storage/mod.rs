//! File storage adapters
//!
//! Implementations of the `FileStorage` port.

pub mod local;

pub use local::LocalFileStorage;
