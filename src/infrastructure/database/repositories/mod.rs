pub mod account_repository;
pub mod repository_provider;

pub use account_repository::SeaOrmAccountRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
