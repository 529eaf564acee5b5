/// Fields of a new account; `id` and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<bool>,
    pub password_hash: String,
    pub role: String,
}

/// Profile fields replaced by an edit. The password is never part of it.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Email,
}

impl SearchField {
    pub fn parse(option: &str) -> Option<Self> {
        match option {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// Case-insensitive substring match on one field
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub field: SearchField,
    pub keyword: String,
}

impl SearchQuery {
    pub fn matches(&self, name: &str, email: &str) -> bool {
        let haystack = match self.field {
            SearchField::Name => name,
            SearchField::Email => email,
        };
        haystack
            .to_lowercase()
            .contains(&self.keyword.to_lowercase())
    }
}

/// Filter for `find`; an empty filter returns the whole collection.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub search: Option<SearchQuery>,
}

impl AccountFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(field: SearchField, keyword: impl Into<String>) -> Self {
        Self {
            search: Some(SearchQuery {
                field,
                keyword: keyword.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = SearchQuery {
            field: SearchField::Name,
            keyword: "ANN".into(),
        };
        assert!(query.matches("Joanna", "x@y.com"));
        assert!(!query.matches("Bob", "ann@y.com"));
    }

    #[test]
    fn unknown_option_has_no_field() {
        assert_eq!(SearchField::parse("email"), Some(SearchField::Email));
        assert_eq!(SearchField::parse("phone"), None);
    }
}
