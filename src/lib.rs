//! # Staff Accounts
//!
//! Login, registration and profile management for staff users and admins.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **shared**: Error taxonomy, pagination, validation helpers, shutdown
//! - **domain**: Account entity, variants, DTOs and repository traits
//! - **application**: The account service and its validated inputs
//! - **infrastructure**: Password hashing, JWT, SeaORM and in-memory stores
//! - **interfaces**: REST API (axum) with health and Prometheus endpoints
//! - **server**: Server lifecycle used by the CLI binary

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
