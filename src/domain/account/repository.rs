use async_trait::async_trait;

use super::{Account, AccountFilter, NewAccount, ProfileChanges};
use crate::shared::{DomainResult, PageRequest};

/// Record store for one account collection.
///
/// Every method is scoped to the collection the repository was built for;
/// an email used by a user never collides with an admin's.
#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>>;
    async fn find(&self, filter: AccountFilter) -> DomainResult<Vec<Account>>;

    /// Newest first.
    async fn find_page(&self, page: PageRequest) -> DomainResult<Vec<Account>>;
    async fn count(&self) -> DomainResult<u64>;

    /// Fails with `DomainError::Conflict` if the email is already stored.
    async fn create(&self, account: NewAccount) -> DomainResult<Account>;

    async fn update_profile(&self, id: &str, changes: ProfileChanges)
        -> DomainResult<Option<Account>>;
    async fn update_password(&self, id: &str, password_hash: &str)
        -> DomainResult<Option<Account>>;

    /// Returns `false` if nothing matched `id`.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
