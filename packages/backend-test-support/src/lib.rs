//! Test helpers shared by the backend's unit and integration tests.
//!
//! Kept free of backend types so error-contract assertions don't depend on
//! the code under test.

pub mod logging;
pub mod problem_details;
