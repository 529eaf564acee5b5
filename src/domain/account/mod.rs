//! Account aggregate
//!
//! Contains the Account entity, its variants, DTOs, and repository interface.

pub mod dto;
pub mod kind;
pub mod model;
pub mod repository;

pub use dto::{AccountFilter, NewAccount, ProfileChanges, SearchField, SearchQuery};
pub use kind::AccountKind;
pub use model::Account;
pub use repository::AccountRepositoryInterface;
