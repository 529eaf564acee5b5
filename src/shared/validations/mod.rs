use std::borrow::Cow;

use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// First violated rule of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn message_of(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code))
}

/// Flatten validator output to one violation per field.
///
/// Nested struct and list errors are not used by any input type and are skipped.
pub fn field_violations(errors: &ValidationErrors) -> Vec<Violation> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            let field: &str = field.as_ref();
            errs.first()
                .map(|e| Violation::new(field, message_of(field, e)))
        })
        .collect()
}

/// Order violations the way the input schema declares its fields.
/// Fields missing from `order` go last, alphabetically.
pub fn sort_by_schema(violations: &mut [Violation], order: &[&str]) {
    violations.sort_by(|a, b| {
        let rank = |v: &Violation| {
            order
                .iter()
                .position(|f| *f == v.field)
                .unwrap_or(order.len())
        };
        rank(a).cmp(&rank(b)).then_with(|| a.field.cmp(&b.field))
    });
}

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Email on register/edit: present first, then well-formed.
pub fn required_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(rejected("required", "Email is required"));
    }
    if !email.validate_email() {
        return Err(rejected("email", "Invalid email"));
    }
    Ok(())
}

/// Email on login: 3 to 32 characters first, then well-formed.
pub fn login_email(email: &str) -> Result<(), ValidationError> {
    let length = email.chars().count();
    if !(3..=32).contains(&length) {
        return Err(rejected("length", "Email must be between 3 and 32 characters"));
    }
    if !email.validate_email() {
        return Err(rejected("email", "Invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(custom(function = "required_email"))]
        email: String,
        #[validate(length(equal = 10))]
        phone: String,
    }

    #[test]
    fn keeps_first_message_per_field_in_schema_order() {
        let sample = Sample {
            name: String::new(),
            email: String::new(),
            phone: "123".into(),
        };
        let errors = sample.validate().unwrap_err();

        let mut found = field_violations(&errors);
        sort_by_schema(&mut found, &["email", "name", "phone"]);

        let messages: Vec<_> = found.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages[0], "Email is required");
        assert_eq!(messages[1], "Name is required");
        assert!(messages[2].starts_with("phone is invalid"));
    }

    #[test]
    fn unknown_fields_sort_last() {
        let mut found = vec![
            Violation::new("zeta", "z"),
            Violation::new("alpha", "a"),
            Violation::new("email", "e"),
        ];
        sort_by_schema(&mut found, &["email"]);
        let fields: Vec<_> = found.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["email", "alpha", "zeta"]);
    }

    #[test]
    fn email_checks_report_one_message() {
        assert_eq!(
            required_email("").unwrap_err().message.unwrap(),
            "Email is required"
        );
        assert_eq!(
            required_email("nope").unwrap_err().message.unwrap(),
            "Invalid email"
        );
        assert!(required_email("a@x.com").is_ok());

        assert_eq!(
            login_email("ab").unwrap_err().message.unwrap(),
            "Email must be between 3 and 32 characters"
        );
        assert_eq!(
            login_email("abcd").unwrap_err().message.unwrap(),
            "Invalid email format"
        );
    }
}
