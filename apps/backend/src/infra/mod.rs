//! Infrastructure: connections, state assembly, and DB error translation.

pub mod db;
pub mod db_errors;
pub mod state;
