use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, SqlErr,
};

use crate::domain::{
    Account, AccountFilter, AccountKind, AccountRepositoryInterface, DomainError, DomainResult,
    NewAccount, ProfileChanges,
};
use crate::infrastructure::database::entities::account;
use crate::shared::{InfraError, PageRequest};

/// Account collection backed by the shared `accounts` table.
pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
    kind: AccountKind,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection, kind: AccountKind) -> Self {
        Self { db, kind }
    }

    fn scoped(&self) -> Select<account::Entity> {
        account::Entity::find().filter(account::Column::Kind.eq(kind_to_entity(self.kind)))
    }

    async fn find_model(&self, id: &str) -> DomainResult<Option<account::Model>> {
        self.scoped()
            .filter(account::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    fn write_err(&self, e: sea_orm::DbErr) -> DomainError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::Conflict(self.kind.email_taken_message())
            }
            _ => db_err(e),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn kind_to_entity(kind: AccountKind) -> account::AccountKind {
    match kind {
        AccountKind::User => account::AccountKind::User,
        AccountKind::Admin => account::AccountKind::Admin,
    }
}

fn kind_to_domain(kind: account::AccountKind) -> AccountKind {
    match kind {
        account::AccountKind::User => AccountKind::User,
        account::AccountKind::Admin => AccountKind::Admin,
    }
}

fn model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        kind: kind_to_domain(model.kind),
        name: model.name,
        email: model.email,
        phone: model.phone,
        gender: model.gender,
        password_hash: model.password_hash,
        role: model.role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(InfraError::Database(e))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepositoryInterface for SeaOrmAccountRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = self
            .scoped()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Account>> {
        Ok(self.find_model(id).await?.map(model_to_domain))
    }

    async fn find(&self, filter: AccountFilter) -> DomainResult<Vec<Account>> {
        let models = self
            .scoped()
            .order_by_desc(account::Column::CreatedAt)
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // SQLite's LOWER() only folds ASCII, so matching happens here.
        Ok(models
            .into_iter()
            .filter(|m| {
                filter
                    .search
                    .as_ref()
                    .map_or(true, |query| query.matches(&m.name, &m.email))
            })
            .map(model_to_domain)
            .collect())
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Vec<Account>> {
        let models = self
            .scoped()
            .order_by_desc(account::Column::CreatedAt)
            .order_by_asc(account::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        self.scoped().count(&self.db).await.map_err(db_err)
    }

    async fn create(&self, new: NewAccount) -> DomainResult<Account> {
        let now = Utc::now();

        let model = account::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            kind: Set(kind_to_entity(self.kind)),
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            gender: Set(new.gender),
            password_hash: Set(new.password_hash),
            role: Set(new.role),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| self.write_err(e))?;
        Ok(model_to_domain(inserted))
    }

    async fn update_profile(
        &self,
        id: &str,
        changes: ProfileChanges,
    ) -> DomainResult<Option<Account>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: account::ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.email = Set(changes.email);
        active.phone = Set(changes.phone);
        if self.kind.has_gender_field() {
            active.gender = Set(changes.gender);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(|e| self.write_err(e))?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> DomainResult<Option<Account>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: account::ActiveModel = existing.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = account::Entity::delete_many()
            .filter(account::Column::Kind.eq(kind_to_entity(self.kind)))
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::SearchField;
    use crate::infrastructure::database::test_support::migrated_memory_db;

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount {
            name: name.into(),
            email: email.into(),
            phone: "0123456789".into(),
            gender: Some(true),
            password_hash: "$2b$04$placeholder".into(),
            role: "employee".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);

        let created = repo.create(new_account("Ann", "ann@x.com")).await.unwrap();
        assert_eq!(created.id.len(), 36);
        assert_eq!(created.kind, AccountKind::User);
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find_by_email("ann@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn unique_index_reports_conflict() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);

        repo.create(new_account("Ann", "ann@x.com")).await.unwrap();
        let err = repo.create(new_account("Other", "ann@x.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let db = migrated_memory_db().await;
        let users = SeaOrmAccountRepository::new(db.clone(), AccountKind::User);
        let admins = SeaOrmAccountRepository::new(db, AccountKind::Admin);

        let user = users.create(new_account("Ann", "ann@x.com")).await.unwrap();
        admins.create(new_account("Ann", "ann@x.com")).await.unwrap();

        assert_eq!(users.count().await.unwrap(), 1);
        assert_eq!(admins.count().await.unwrap(), 1);
        assert!(admins.find_by_id(&user.id).await.unwrap().is_none());
        assert!(!admins.delete(&user.id).await.unwrap());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_escapes_wildcards() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);
        repo.create(new_account("Joanna", "jo@x.com")).await.unwrap();
        repo.create(new_account("Bob", "bob@x.com")).await.unwrap();

        let hits = repo
            .find(AccountFilter::search(SearchField::Name, "ANN"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Joanna");

        let wildcard = repo
            .find(AccountFilter::search(SearchField::Email, "%"))
            .await
            .unwrap();
        assert!(wildcard.is_empty());

        assert_eq!(repo.find(AccountFilter::all()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);
        repo.create(new_account("Đức Anh", "duc@x.com")).await.unwrap();
        repo.create(new_account("Bình", "binh@x.com")).await.unwrap();

        let hits = repo
            .find(AccountFilter::search(SearchField::Name, "đức"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Đức Anh");

        let hits = repo
            .find(AccountFilter::search(SearchField::Name, "BÌNH"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);
        let mut ids = Vec::new();
        for i in 0..3 {
            let created = repo
                .create(new_account("N", &format!("n{}@x.com", i)))
                .await
                .unwrap();
            ids.push(created.id);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let first = repo.find_page(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, ids[2]);
        assert_eq!(first[1].id, ids[1]);

        let second = repo.find_page(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, ids[0]);

        assert!(repo.find_page(PageRequest::new(5, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_page_requests_do_not_fail() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);
        repo.create(new_account("N", "n@x.com")).await.unwrap();

        assert!(repo
            .find_page(PageRequest::new(u64::MAX, 10))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.find_page(PageRequest::new(1, u64::MAX))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn update_profile_keeps_password_and_missing_id_is_none() {
        let db = migrated_memory_db().await;
        let repo = SeaOrmAccountRepository::new(db, AccountKind::User);
        let created = repo.create(new_account("Ann", "ann@x.com")).await.unwrap();

        let changes = ProfileChanges {
            name: "Anna".into(),
            email: "anna@x.com".into(),
            phone: "9876543210".into(),
            gender: Some(false),
        };
        let updated = repo
            .update_profile(&created.id, changes.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.gender, Some(false));
        assert_eq!(updated.password_hash, created.password_hash);

        assert!(repo.update_profile("missing", changes).await.unwrap().is_none());
        assert!(repo.update_password("missing", "h").await.unwrap().is_none());
    }
}
