//! Persistence functions, generic over `ConnectionTrait` so the same code
//! runs on a pooled connection or inside a transaction.

pub mod followers;
pub mod ownership;
pub mod posts;
pub mod users;
