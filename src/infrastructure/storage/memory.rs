//! In-memory storage implementation

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Account, AccountFilter, AccountKind, AccountRepositoryInterface, DomainError, DomainResult,
    NewAccount, ProfileChanges, RepositoryProvider,
};
use crate::shared::PageRequest;

/// In-memory account collection for development and testing.
///
/// `emails` maps each stored email to its owner's id; claiming an email
/// goes through its entry so two writers cannot both take it.
pub struct InMemoryAccountRepository {
    kind: AccountKind,
    records: DashMap<String, Account>,
    emails: DashMap<String, String>,
}

impl InMemoryAccountRepository {
    pub fn new(kind: AccountKind) -> Self {
        Self {
            kind,
            records: DashMap::new(),
            emails: DashMap::new(),
        }
    }

    fn claim_email(&self, email: &str, owner: &str) -> DomainResult<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(taken) if taken.get() != owner => {
                Err(DomainError::Conflict(self.kind.email_taken_message()))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(owner.to_string());
                Ok(())
            }
        }
    }

    fn release_email(&self, email: &str, owner: &str) {
        self.emails.remove_if(email, |_, id| id == owner);
    }

    fn sorted(&self) -> Vec<Account> {
        let mut all: Vec<Account> = self.records.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        all
    }
}

#[async_trait]
impl AccountRepositoryInterface for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let Some(owner) = self.emails.get(email).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        Ok(self.records.get(&owner).map(|r| r.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    async fn find(&self, filter: AccountFilter) -> DomainResult<Vec<Account>> {
        let all = self.sorted();
        Ok(match filter.search {
            Some(query) => all
                .into_iter()
                .filter(|a| query.matches(&a.name, &a.email))
                .collect(),
            None => all,
        })
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Vec<Account>> {
        Ok(self
            .sorted()
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.records.len() as u64)
    }

    async fn create(&self, new: NewAccount) -> DomainResult<Account> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        self.claim_email(&new.email, &id)?;

        let account = Account {
            id: id.clone(),
            kind: self.kind,
            name: new.name,
            email: new.email,
            phone: new.phone,
            gender: new.gender,
            password_hash: new.password_hash,
            role: new.role,
            created_at: now,
            updated_at: now,
        };
        self.records.insert(id, account.clone());
        Ok(account)
    }

    async fn update_profile(
        &self,
        id: &str,
        changes: ProfileChanges,
    ) -> DomainResult<Option<Account>> {
        let Some(current_email) = self.records.get(id).map(|r| r.email.clone()) else {
            return Ok(None);
        };

        if changes.email != current_email {
            self.claim_email(&changes.email, id)?;
            self.release_email(&current_email, id);
        }

        let Some(mut record) = self.records.get_mut(id) else {
            self.release_email(&changes.email, id);
            return Ok(None);
        };
        record.name = changes.name;
        record.email = changes.email;
        record.phone = changes.phone;
        if self.kind.has_gender_field() {
            record.gender = changes.gender;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> DomainResult<Option<Account>> {
        let Some(mut record) = self.records.get_mut(id) else {
            return Ok(None);
        };
        record.password_hash = password_hash.to_string();
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        match self.records.remove(id) {
            Some((_, removed)) => {
                self.release_email(&removed.email, id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Both collections held in process memory
pub struct InMemoryRepositoryProvider {
    users: InMemoryAccountRepository,
    admins: InMemoryAccountRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            users: InMemoryAccountRepository::new(AccountKind::User),
            admins: InMemoryAccountRepository::new(AccountKind::Admin),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn accounts(&self, kind: AccountKind) -> &dyn AccountRepositoryInterface {
        match kind {
            AccountKind::User => &self.users,
            AccountKind::Admin => &self.admins,
        }
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}
