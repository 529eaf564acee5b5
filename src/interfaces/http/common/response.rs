//! Response envelope
//!
//! Every endpoint answers with the same flat JSON object; only the keys
//! relevant to the operation are present.

use serde::{Deserialize, Serialize};

use crate::domain::AccountKind;
use crate::interfaces::http::modules::accounts::AccountView;

/// `error` is a single message, or one message per invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AccountView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<AccountView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl ApiEnvelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorDetail::One(message.into())),
            ..Self::default()
        }
    }

    pub fn errors(messages: Vec<String>) -> Self {
        Self {
            error: Some(ErrorDetail::Many(messages)),
            ..Self::default()
        }
    }

    /// Place the account under `user` or `admin` depending on its kind.
    pub fn with_account(mut self, kind: AccountKind, view: AccountView) -> Self {
        match kind {
            AccountKind::User => self.user = Some(view),
            AccountKind::Admin => self.admin = Some(view),
        }
        self
    }

    pub fn with_accounts(mut self, views: Vec<AccountView>) -> Self {
        self.users = Some(views);
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn with_page(mut self, total_page: u64, count: u64) -> Self {
        self.total_page = Some(total_page);
        self.count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_populated_keys_are_serialized() {
        let envelope = ApiEnvelope::message("Delete successful");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Delete successful"}));
    }

    #[test]
    fn error_detail_is_string_or_list() {
        let one = serde_json::to_value(ApiEnvelope::error("Incorrect password")).unwrap();
        assert_eq!(one["error"], "Incorrect password");

        let many = serde_json::to_value(ApiEnvelope::errors(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(many["error"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn page_keys_are_camel_case() {
        let json = serde_json::to_value(ApiEnvelope::default().with_page(3, 21)).unwrap();
        assert_eq!(json["totalPage"], 3);
        assert_eq!(json["count"], 21);
    }
}
