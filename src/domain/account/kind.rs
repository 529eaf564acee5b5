use std::fmt;

use serde::{Deserialize, Serialize};

/// Which collection an account lives in.
///
/// Users and admins share the [`Account`](super::Account) shape; the
/// variant decides the default role and which operations are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    User,
    Admin,
}

impl AccountKind {
    /// Storage discriminator and JSON key (`"user"` / `"admin"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Capitalized name used in messages.
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }

    pub const fn default_role(self) -> &'static str {
        match self {
            Self::User => "employee",
            Self::Admin => "admin",
        }
    }

    pub const fn has_gender_field(self) -> bool {
        matches!(self, Self::User)
    }

    /// List, search and delete are only offered for users.
    pub const fn supports_listing(self) -> bool {
        matches!(self, Self::User)
    }

    pub fn email_taken_message(self) -> String {
        format!(
            "{} email is already in use. Try using another email.",
            self.entity_name()
        )
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_differ_per_variant() {
        assert!(AccountKind::User.has_gender_field());
        assert!(AccountKind::User.supports_listing());
        assert!(!AccountKind::Admin.has_gender_field());
        assert!(!AccountKind::Admin.supports_listing());
        assert_eq!(AccountKind::User.default_role(), "employee");
    }

    #[test]
    fn conflict_message_names_the_collection() {
        assert_eq!(
            AccountKind::Admin.email_taken_message(),
            "Admin email is already in use. Try using another email."
        );
        assert_eq!(AccountKind::User.to_string(), "user");
    }
}
