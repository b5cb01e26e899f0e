use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::AgeError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// The email address is the user's identity: it is what access tokens carry
/// and what login looks up. Only the password hash is ever stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub age: Age,
    pub is_active: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is blank
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration or login.
///
/// Never stored; the service hashes it immediately. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `Empty` - Password is blank
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Age in years, 0 to 150.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(u8);

impl Age {
    const MIN: i64 = 0;
    const MAX: i64 = 150;

    /// # Errors
    /// * `OutOfRange` - Negative or above 150
    pub fn new(age: i64) -> Result<Self, AgeError> {
        u8::try_from(age)
            .ok()
            .filter(|age| i64::from(*age) <= Self::MAX)
            .map(Age)
            .ok_or(AgeError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: age,
            })
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub age: Age,
    pub is_active: bool,
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub age: Option<Age>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(Username::new("nicola".to_string()).is_ok());
        assert_eq!(
            Username::new("n".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 1 })
        );
        assert!(matches!(
            Username::new("x".repeat(33)),
            Err(UsernameError::TooLong { max: 32, .. })
        ));
        assert_eq!(
            Username::new("bad name".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_email_is_trimmed_and_validated() {
        let email = EmailAddress::new("  a@b.com ".to_string()).expect("valid email");
        assert_eq!(email.as_str(), "a@b.com");

        assert_eq!(EmailAddress::new("   ".to_string()), Err(EmailError::Empty));
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("secret1".to_string()).is_ok());
        assert_eq!(
            Password::new("      ".to_string()),
            Err(PasswordPolicyError::Empty)
        );
        assert_eq!(
            Password::new("abc".to_string()),
            Err(PasswordPolicyError::TooShort { min: 6 })
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("secret1".to_string()).expect("valid password");
        assert!(!format!("{:?}", password).contains("secret1"));
    }

    #[test]
    fn test_age_range() {
        assert_eq!(Age::new(0).map(|a| a.value()), Ok(0));
        assert_eq!(Age::new(150).map(|a| a.value()), Ok(150));
        assert!(Age::new(-1).is_err());
        assert!(Age::new(151).is_err());
        assert!(Age::new(i64::MAX).is_err());
    }

    #[test]
    fn test_user_id_parsing() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }
}
