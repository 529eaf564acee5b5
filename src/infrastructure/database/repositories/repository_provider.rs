//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use super::account_repository::SeaOrmAccountRepository;
use crate::domain::{
    AccountKind, AccountRepositoryInterface, DomainError, DomainResult, RepositoryProvider,
};
use crate::shared::InfraError;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-collection repository accessors.
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    users: SeaOrmAccountRepository,
    admins: SeaOrmAccountRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmAccountRepository::new(db.clone(), AccountKind::User),
            admins: SeaOrmAccountRepository::new(db.clone(), AccountKind::Admin),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn accounts(&self, kind: AccountKind) -> &dyn AccountRepositoryInterface {
        match kind {
            AccountKind::User => &self.users,
            AccountKind::Admin => &self.admins,
        }
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(|e| DomainError::Internal(InfraError::Database(e)))?;
        Ok(())
    }
}
