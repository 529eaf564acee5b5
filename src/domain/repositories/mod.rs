//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-collection
//! account repositories and lets the health check probe the store.

use async_trait::async_trait;

use super::account::{AccountKind, AccountRepositoryInterface};
use crate::shared::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let admin = repos.accounts(AccountKind::Admin).find_by_email("a@x.com").await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn accounts(&self, kind: AccountKind) -> &dyn AccountRepositoryInterface;

    /// Cheap round-trip proving the store is reachable.
    async fn ping(&self) -> DomainResult<()>;
}
