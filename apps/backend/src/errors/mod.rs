//! Error codes for the Order Helper backend.

pub mod error_code;

pub use error_code::ErrorCode;
