//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: idempotent
//! logging initialization and assertions over Problem Details error bodies.

pub mod logging;
pub mod problem_details;
