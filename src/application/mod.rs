pub mod identity;

// Re-export key types for convenience
pub use identity::{
    AccountService, AuthResult, ChangePasswordInput, EmailUniqueness, ListInput, LoginInput,
    ProfileInput, SearchInput,
};
