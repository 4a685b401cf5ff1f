//! Startup configuration read from the environment.
//!
//! Everything here is resolved once in `main` and then frozen inside
//! `AppState`. Parsing goes through a lookup closure so tests don't have to
//! touch the process environment.

pub mod db;
pub mod server;
