//! Storage adapters.

pub mod fixed_storage;

pub use fixed_storage::FixedStorage;
