pub mod account;
pub mod repositories;

// Re-export commonly used types
pub use account::{
    Account, AccountFilter, AccountKind, AccountRepositoryInterface, NewAccount, ProfileChanges,
    SearchField, SearchQuery,
};
pub use repositories::RepositoryProvider;

// Re-export errors from shared for convenience
pub use crate::shared::{DomainError, DomainResult};
