//! Reusable account server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! store init, migrations, REST API, metrics, and graceful shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::identity::AccountService;
use crate::config::AppConfig;
use crate::domain::{AccountKind, RepositoryProvider};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::{create_api_router, AccountServices};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the account server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running account server.
///
/// # Examples
///
/// ```rust,no_run
/// use staff_accounts::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the API is listening on (resolved when configured as 0).
    pub api_port: u16,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Open the store (SQL with migrations, or in-memory)
    /// 3. Build the user and admin services
    /// 4. Bind and serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting staff accounts server...");

        let metrics = prometheus_handle().map(|handle| MetricsState { handle });

        // ── Store ──────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if app_cfg.database.is_memory() {
                warn!("Using in-memory store; data is lost on shutdown");
                (Arc::new(InMemoryRepositoryProvider::new()), None)
            } else {
                let db = init_database(&app_cfg.database.to_database_config()).await?;
                if opts.auto_migrate {
                    info!("Running database migrations...");
                    Migrator::up(&db, None).await?;
                    info!("Migrations completed");
                }
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        // ── Services & router ──────────────────────────────────
        let services = build_services(repos.clone(), &app_cfg);
        info!(
            "JWT configured with {}h token expiration",
            app_cfg.security.jwt_expiration_hours
        );
        let api_router = create_api_router(services, HealthState::new(repos.clone()), metrics);

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            api_port: local_addr.port(),
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }

    /// Trigger shutdown, let in-flight requests finish within the
    /// configured timeout, then close the database.
    pub async fn shutdown(self) {
        info!("Shutting down staff accounts server...");

        let api_task = self.api_task;
        let finished = self
            .shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if !finished {
            warn!("REST API server did not stop in time");
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Shutdown complete");
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// One [`AccountService`] per collection, configured from `config`.
pub fn build_services(repos: Arc<dyn RepositoryProvider>, config: &AppConfig) -> AccountServices {
    let build = |kind| {
        Arc::new(
            AccountService::new(repos.clone(), kind, config.security.jwt_config())
                .with_password_cost(config.security.bcrypt_cost)
                .with_email_uniqueness(config.accounts.email_uniqueness())
                .with_default_page_size(config.accounts.default_page_size),
        )
    };

    AccountServices {
        users: build(AccountKind::User),
        admins: build(AccountKind::Admin),
    }
}

/// The global recorder can only be installed once per process; restarts
/// within the same process reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, recorder install failed: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "memory".into();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.security.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn starts_and_stops_on_memory_store() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            auto_migrate: false,
        })
        .await
        .unwrap();

        assert_ne!(handle.api_port, 0);
        assert!(handle.is_running());
        handle.repos.ping().await.unwrap();

        let signal = handle.shutdown_signal();
        handle.shutdown().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let mut config = memory_config();
        config.security.jwt_secret = String::new();

        let result = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: false,
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn services_follow_account_settings() {
        use crate::application::identity::ProfileInput;
        use crate::domain::DomainError;

        let mut config = memory_config();
        config.accounts.exclude_self_on_update = false;
        let services = build_services(Arc::new(InMemoryRepositoryProvider::new()), &config);
        assert_eq!(services.admins.kind(), AccountKind::Admin);

        let input = ProfileInput {
            name: "A".into(),
            phone: "0123456789".into(),
            email: "a@x.com".into(),
            password: "secret1".into(),
            gender: Some(true),
        };
        let created = services.users.register(input.clone()).await.unwrap();
        let err = services
            .users
            .update_profile(&created.id, input)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
