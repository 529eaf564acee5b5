//! Validated inputs for the account use-cases
//!
//! String fields default to empty when missing so an absent field is
//! reported through its validation message instead of a parse failure.

use serde::Deserialize;
use validator::Validate;

use crate::shared::validations::{login_email, required_email};

/// Field order used when reporting login violations.
pub const LOGIN_FIELDS: &[&str] = &["email", "password"];

/// Field order used when reporting register/edit violations.
pub const PROFILE_FIELDS: &[&str] = &["email", "password", "name", "gender", "phone"];

/// Field order used when reporting change-password violations.
/// Both spellings are listed since errors may be keyed by the serde name.
pub const CHANGE_PASSWORD_FIELDS: &[&str] =
    &["old_password", "oldPassword", "new_password", "newPassword"];

pub const LIST_FIELDS: &[&str] = &["page_index", "pageIndex", "page_size", "pageSize"];

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginInput {
    #[validate(custom(function = "login_email"))]
    pub email: String,
    #[validate(length(min = 6, max = 32, message = "Password must be between 6 and 32 characters"))]
    pub password: String,
}

/// Register and edit share one schema. `gender` is checked by the
/// service because only users carry it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(equal = 10, message = "Phone must have exactly 10 digits"))]
    pub phone: String,
    #[validate(custom(function = "required_email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub gender: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordInput {
    #[validate(length(
        min = 6,
        max = 32,
        message = "oldPassword must be between 6 and 32 characters"
    ))]
    pub old_password: String,
    #[validate(length(
        min = 6,
        max = 32,
        message = "newPassword must be between 6 and 32 characters"
    ))]
    pub new_password: String,
}

/// Page selection; missing values fall back to page 1 and the
/// configured default size.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ListInput {
    #[validate(range(min = 1, message = "pageIndex must be at least 1"))]
    pub page_index: Option<u64>,
    #[validate(range(
        min = 1,
        max = 1000,
        message = "pageSize must be between 1 and 1000"
    ))]
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchInput {
    pub keyword: Option<String>,
    pub option: Option<String>,
}
