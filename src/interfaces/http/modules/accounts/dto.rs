//! Account DTOs

use serde::{Deserialize, Serialize};

use crate::domain::Account;
use crate::shared::format_display_date;

/// Account API representation. The password hash never leaves the
/// service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<bool>,
    pub role: String,
    /// `DD/MM/YYYY`
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for AccountView {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            phone: a.phone,
            gender: a.gender,
            role: a.role,
            created_at: format_display_date(&a.created_at),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountKind;
    use chrono::{TimeZone, Utc};

    #[test]
    fn view_formats_created_at_and_drops_hash() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let account = Account {
            id: "1".into(),
            kind: AccountKind::Admin,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            phone: "0123456789".into(),
            gender: None,
            password_hash: "$2b$04$secret".into(),
            role: "admin".into(),
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(AccountView::from(account)).unwrap();
        assert_eq!(json["createdAt"], "05/03/2024");
        assert!(json.get("gender").is_none());
        assert!(!json.to_string().contains("secret"));
    }
}
