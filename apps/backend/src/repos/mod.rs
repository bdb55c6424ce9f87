//! Repository traits.

pub mod storage;

pub use storage::Storage;
