//! API Router

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::modules::accounts::{self, AccountHandlerState};
use super::modules::health::{health_check, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use crate::application::AccountService;
use crate::domain::AccountKind;

/// One service per account collection
#[derive(Clone)]
pub struct AccountServices {
    pub users: Arc<AccountService>,
    pub admins: Arc<AccountService>,
}

/// Routes for one collection. Listing, search and delete are only
/// mounted when the variant supports them.
fn account_routes(service: Arc<AccountService>) -> Router {
    let kind = service.kind();
    let create_path = match kind {
        AccountKind::User => "/create-user",
        AccountKind::Admin => "/create-admin",
    };

    let mut by_id = get(accounts::get_account).put(accounts::update_profile);
    let mut routes = Router::new()
        .route("/login", post(accounts::login))
        .route(create_path, post(accounts::register))
        .route("/change-password/{id}", put(accounts::change_password));

    if kind.supports_listing() {
        by_id = by_id.delete(accounts::delete_account);
        routes = routes
            .route("/get-paging-user", get(accounts::list_accounts))
            .route("/search-user", post(accounts::search_accounts));
    }

    routes
        .route("/{id}", by_id)
        .with_state(AccountHandlerState::new(service))
}

/// Create the API router with all routes
pub fn create_api_router(
    services: AccountServices,
    health: HealthState,
    metrics: Option<MetricsState>,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health_check))
        .with_state(health);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(health_routes)
        .nest("/api/user", account_routes(services.users))
        .nest("/api/admin", account_routes(services.admins));

    if let Some(metrics) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(metrics),
        );
    }

    router
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Router over a fresh in-memory store, for handler tests.
#[cfg(test)]
pub(crate) fn test_router() -> Router {
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::crypto::jwt::JwtConfig;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
    let build = |kind| {
        Arc::new(AccountService::new(repos.clone(), kind, JwtConfig::default()).with_password_cost(4))
    };
    let services = AccountServices {
        users: build(AccountKind::User),
        admins: build(AccountKind::Admin),
    };

    create_api_router(services, HealthState::new(repos.clone()), None)
}
