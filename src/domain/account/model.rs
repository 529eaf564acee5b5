use chrono::{DateTime, Utc};

use super::AccountKind;

/// Stored account record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub kind: AccountKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Only set for [`AccountKind::User`].
    pub gender: Option<bool>,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
