//! Account service — application-layer orchestration
//!
//! One service instance serves one [`AccountKind`]. HTTP handlers are thin
//! wrappers that delegate here.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use super::commands::{
    ChangePasswordInput, ListInput, LoginInput, ProfileInput, SearchInput,
    CHANGE_PASSWORD_FIELDS, LIST_FIELDS, LOGIN_FIELDS, PROFILE_FIELDS,
};
use crate::domain::{
    Account, AccountFilter, AccountKind, AccountRepositoryInterface, DomainError, DomainResult,
    NewAccount, ProfileChanges, RepositoryProvider, SearchField,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password, DEFAULT_COST};
use crate::shared::{
    field_violations, sort_by_schema, InfraError, PageRequest, PaginatedResult, Violation,
};

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub account: Account,
}

/// Which records count as a conflict when an edit sets an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailUniqueness {
    /// The edited account may keep its own email.
    #[default]
    ExcludeSelf,
    /// Any record holding the email conflicts, the edited one included.
    Collection,
}

impl EmailUniqueness {
    pub fn from_exclude_self(exclude_self: bool) -> Self {
        if exclude_self {
            Self::ExcludeSelf
        } else {
            Self::Collection
        }
    }
}

/// Login, registration, profile and password management for one
/// account collection.
pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    kind: AccountKind,
    jwt_config: JwtConfig,
    password_cost: u32,
    email_uniqueness: EmailUniqueness,
    default_page_size: u64,
}

impl AccountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, kind: AccountKind, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            kind,
            jwt_config,
            password_cost: DEFAULT_COST,
            email_uniqueness: EmailUniqueness::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn with_email_uniqueness(mut self, policy: EmailUniqueness) -> Self {
        self.email_uniqueness = policy;
        self
    }

    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    fn repo(&self) -> &dyn AccountRepositoryInterface {
        self.repos.accounts(self.kind)
    }

    fn not_found(&self, field: &'static str, value: &str) -> DomainError {
        DomainError::not_found(self.kind.entity_name(), field, value)
    }

    fn require_listing(&self, operation: &str) -> DomainResult<()> {
        if self.kind.supports_listing() {
            Ok(())
        } else {
            Err(DomainError::Unsupported(format!(
                "{} is not available for {} accounts",
                operation, self.kind
            )))
        }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and issue a token. The token is only minted
    /// once the password has matched.
    pub async fn login(&self, input: LoginInput) -> DomainResult<AuthResult> {
        first_violation(&input, LOGIN_FIELDS)?;

        let Some(account) = self.repo().find_by_email(&input.email).await? else {
            warn!(kind = %self.kind, "Login for unknown email");
            return Err(self.not_found("email", &input.email));
        };

        if !self.verify(input.password, account.password_hash.clone()).await? {
            warn!(kind = %self.kind, account_id = %account.id, "Login with incorrect password");
            return Err(DomainError::Unauthorized("Incorrect password".into()));
        }

        let token = create_token(&account.id, self.kind.as_str(), &account.role, &self.jwt_config)
            .map_err(InfraError::from)?;

        info!(kind = %self.kind, account_id = %account.id, "Login successful");
        Ok(AuthResult {
            token,
            account,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an account with the variant's default role.
    pub async fn register(&self, input: ProfileInput) -> DomainResult<Account> {
        self.validate_profile(&input)?;

        if self.repo().find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict(self.kind.email_taken_message()));
        }

        let password_hash = self.hash(input.password).await?;
        let new = NewAccount {
            name: input.name,
            email: input.email,
            phone: input.phone,
            gender: self.gender_of(input.gender),
            password_hash,
            role: self.kind.default_role().to_string(),
        };

        let account = self.repo().create(new).await?;
        info!(kind = %self.kind, account_id = %account.id, "Account registered");
        Ok(account)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Replace name, email, phone (and gender for users). The password
    /// must pass validation but is never stored here.
    pub async fn update_profile(&self, id: &str, input: ProfileInput) -> DomainResult<Account> {
        self.validate_profile(&input)?;

        if let Some(holder) = self.repo().find_by_email(&input.email).await? {
            let conflicts = match self.email_uniqueness {
                EmailUniqueness::ExcludeSelf => holder.id != id,
                EmailUniqueness::Collection => true,
            };
            if conflicts {
                return Err(DomainError::Conflict(self.kind.email_taken_message()));
            }
        }

        let changes = ProfileChanges {
            name: input.name,
            email: input.email,
            phone: input.phone,
            gender: self.gender_of(input.gender),
        };

        let account = self
            .repo()
            .update_profile(id, changes)
            .await?
            .ok_or_else(|| self.not_found("id", id))?;

        info!(kind = %self.kind, account_id = %account.id, "Profile updated");
        Ok(account)
    }

    /// Change the password after checking the current one.
    pub async fn change_password(
        &self,
        id: &str,
        input: ChangePasswordInput,
    ) -> DomainResult<Account> {
        first_violation(&input, CHANGE_PASSWORD_FIELDS)?;

        let account = self
            .repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.not_found("id", id))?;

        if !self.verify(input.old_password, account.password_hash).await? {
            return Err(DomainError::Unauthorized("Old password is incorrect".into()));
        }

        let new_hash = self.hash(input.new_password).await?;
        let updated = self
            .repo()
            .update_password(id, &new_hash)
            .await?
            .ok_or_else(|| self.not_found("id", id))?;

        info!(kind = %self.kind, account_id = %id, "Password changed");
        Ok(updated)
    }

    /// Delete an account by ID.
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.require_listing("Delete")?;

        if !self.repo().delete(id).await? {
            return Err(self.not_found("id", id));
        }
        info!(kind = %self.kind, account_id = %id, "Account deleted");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, id: &str) -> DomainResult<Account> {
        self.repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.not_found("id", id))
    }

    /// Newest-first page of the collection.
    pub async fn list(&self, input: ListInput) -> DomainResult<PaginatedResult<Account>> {
        self.require_listing("Listing")?;
        first_violation(&input, LIST_FIELDS)?;

        let page = PageRequest::new(
            input.page_index.unwrap_or(1),
            input.page_size.unwrap_or(self.default_page_size),
        );
        let total = self.repo().count().await?;
        let items = self.repo().find_page(page).await?;

        Ok(PaginatedResult::new(items, total, page.page, page.page_size))
    }

    /// Keyword search on `name` or `email`. Without a keyword or option
    /// the whole collection is returned; an unknown option searches
    /// nothing and also returns everything.
    pub async fn search(&self, input: SearchInput) -> DomainResult<Vec<Account>> {
        self.require_listing("Search")?;

        let keyword = input.keyword.unwrap_or_default();
        let option = input.option.unwrap_or_default();
        if keyword.is_empty() || option.is_empty() {
            return self.repo().find(AccountFilter::all()).await;
        }

        let filter = match SearchField::parse(&option) {
            Some(field) => AccountFilter::search(field, keyword.clone()),
            None => AccountFilter::all(),
        };

        let found = self.repo().find(filter).await?;
        if found.is_empty() {
            return Err(self.not_found("keyword", &keyword));
        }
        Ok(found)
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn gender_of(&self, gender: Option<bool>) -> Option<bool> {
        if self.kind.has_gender_field() {
            gender
        } else {
            None
        }
    }

    fn validate_profile(&self, input: &ProfileInput) -> DomainResult<()> {
        let mut violations = match input.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_violations(&errors),
        };
        if self.kind.has_gender_field() && input.gender.is_none() {
            violations.push(Violation::new("gender", "Gender is required"));
        }
        if violations.is_empty() {
            return Ok(());
        }

        sort_by_schema(&mut violations, PROFILE_FIELDS);
        Err(DomainError::InvalidFields(
            violations.into_iter().map(|v| v.message).collect(),
        ))
    }

    async fn hash(&self, plain: String) -> DomainResult<String> {
        let cost = self.password_cost;
        let hashed = tokio::task::spawn_blocking(move || hash_password(&plain, cost))
            .await
            .map_err(InfraError::from)?
            .map_err(InfraError::from)?;
        Ok(hashed)
    }

    async fn verify(&self, plain: String, hash: String) -> DomainResult<bool> {
        let outcome = tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
            .await
            .map_err(InfraError::from)?;

        Ok(outcome.unwrap_or_else(|e| {
            warn!(kind = %self.kind, error = %e, "Stored password hash is unreadable");
            false
        }))
    }
}

/// Report only the first violation, in `order`.
fn first_violation<T: Validate>(input: &T, order: &[&str]) -> DomainResult<()> {
    let Err(errors) = input.validate() else {
        return Ok(());
    };

    let mut violations = field_violations(&errors);
    sort_by_schema(&mut violations, order);
    let message = violations
        .into_iter()
        .next()
        .map(|v| v.message)
        .unwrap_or_else(|| "Validation failed".to_string());
    Err(DomainError::Validation(message))
}
