//! Account API handlers
//!
//! The same handlers serve `/api/user` and `/api/admin`; the state carries
//! the service for the collection. Everything delegates to
//! `AccountService` from the application/identity layer.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use super::dto::AccountView;
use crate::application::identity::{
    AccountService, ChangePasswordInput, ListInput, LoginInput, ProfileInput, SearchInput,
};
use crate::interfaces::http::common::{ApiEnvelope, ApiResult, JsonBody, QueryParams};

/// Account handler state
#[derive(Clone)]
pub struct AccountHandlerState {
    pub service: Arc<AccountService>,
}

impl AccountHandlerState {
    pub fn new(service: Arc<AccountService>) -> Self {
        Self { service }
    }
}

/// `POST /login`
pub async fn login(
    State(state): State<AccountHandlerState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> ApiResult {
    let auth = state.service.login(input).await?;

    Ok(Json(
        ApiEnvelope::message("Login successful")
            .with_account(state.service.kind(), auth.account.into())
            .with_token(auth.token),
    ))
}

/// `POST /create-user`, `POST /create-admin`
pub async fn register(
    State(state): State<AccountHandlerState>,
    JsonBody(input): JsonBody<ProfileInput>,
) -> ApiResult {
    let account = state.service.register(input).await?;

    Ok(Json(
        ApiEnvelope::message("Account has been successfully created.")
            .with_account(state.service.kind(), account.into()),
    ))
}

/// `PUT /{id}`
pub async fn update_profile(
    State(state): State<AccountHandlerState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ProfileInput>,
) -> ApiResult {
    let account = state.service.update_profile(&id, input).await?;

    Ok(Json(
        ApiEnvelope::message("Update successful").with_account(state.service.kind(), account.into()),
    ))
}

/// `PUT /change-password/{id}`
pub async fn change_password(
    State(state): State<AccountHandlerState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ChangePasswordInput>,
) -> ApiResult {
    let account = state.service.change_password(&id, input).await?;

    Ok(Json(
        ApiEnvelope::message("Update password successful")
            .with_account(state.service.kind(), account.into()),
    ))
}

/// `GET /{id}`
pub async fn get_account(
    State(state): State<AccountHandlerState>,
    Path(id): Path<String>,
) -> ApiResult {
    let account = state.service.get(&id).await?;

    Ok(Json(
        ApiEnvelope::default().with_account(state.service.kind(), account.into()),
    ))
}

/// `GET /get-paging-user?pageIndex&pageSize`
pub async fn list_accounts(
    State(state): State<AccountHandlerState>,
    QueryParams(input): QueryParams<ListInput>,
) -> ApiResult {
    let page = state.service.list(input).await?;
    let total_pages = page.total_pages;
    let total = page.total;
    let views: Vec<AccountView> = page.items.into_iter().map(AccountView::from).collect();

    Ok(Json(
        ApiEnvelope::default()
            .with_accounts(views)
            .with_page(total_pages, total),
    ))
}

/// `POST /search-user`
pub async fn search_accounts(
    State(state): State<AccountHandlerState>,
    JsonBody(input): JsonBody<SearchInput>,
) -> ApiResult {
    let found = state.service.search(input).await?;
    let views = found.into_iter().map(AccountView::from).collect();

    Ok(Json(ApiEnvelope::default().with_accounts(views)))
}

/// `DELETE /{id}`
pub async fn delete_account(
    State(state): State<AccountHandlerState>,
    Path(id): Path<String>,
) -> ApiResult {
    state.service.delete(&id).await?;
    Ok(Json(ApiEnvelope::message("Delete successful")))
}

// ── Tests ──────────────────────────────────────────────────────
