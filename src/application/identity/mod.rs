//! Identity module — account management & authentication
//!
//! Contains the `AccountService` which orchestrates login, registration,
//! profile updates, password changes and collection queries for one
//! account variant.

pub mod commands;
pub mod service;

pub use commands::{ChangePasswordInput, ListInput, LoginInput, ProfileInput, SearchInput};
pub use service::{AccountService, AuthResult, EmailUniqueness, DEFAULT_PAGE_SIZE};
