//! Accounts module — login, registration and profile management for
//! users and admins

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
