//! Storage module

pub mod memory;

pub use memory::{InMemoryAccountRepository, InMemoryRepositoryProvider};
