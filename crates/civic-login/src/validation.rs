//! Field-level checks run before any authenticator call

/// Per-field validation messages
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Check a username, returning the message to show under the field
pub fn validate_username(value: &str, min_len: usize) -> Option<String> {
    if value.is_empty() {
        return Some("Username is required".to_string());
    }
    if value.chars().count() < min_len {
        return Some(format!("Username must be at least {} characters", min_len));
    }
    None
}

/// Check a password, returning the message to show under the field
pub fn validate_password(value: &str, min_len: usize) -> Option<String> {
    if value.is_empty() {
        return Some("Password is required".to_string());
    }
    if value.chars().count() < min_len {
        return Some(format!("Password must be at least {} characters", min_len));
    }
    None
}

/// Check both credential fields
pub fn validate_credentials(
    username: &str,
    password: &str,
    min_username_len: usize,
    min_password_len: usize,
) -> FieldErrors {
    FieldErrors {
        username: validate_username(username, min_username_len),
        password: validate_password(password, min_password_len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Some("Username is required"))]
    #[case("ab", Some("Username must be at least 3 characters"))]
    #[case("bob", None)]
    #[case("ठाणे", None)]
    fn test_username_rules(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(validate_username(input, 3).as_deref(), expected);
    }

    #[rstest]
    #[case("", Some("Password is required"))]
    #[case("1234", Some("Password must be at least 5 characters"))]
    #[case("12345", None)]
    fn test_password_rules(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(validate_password(input, 5).as_deref(), expected);
    }

    #[test]
    fn test_short_password_blocks() {
        let errors = validate_credentials("bob", "1234", 3, 5);
        assert!(!errors.is_empty());
        assert!(errors.username.is_none());
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 5 characters")
        );
    }
}
