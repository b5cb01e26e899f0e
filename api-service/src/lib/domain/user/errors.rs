use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },
}

/// Error for Age validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("Age must be between {min} and {max}, got {actual}")]
    OutOfRange { min: i64, max: i64, actual: i64 },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid age: {0}")]
    InvalidAge(#[from] AgeError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("Username already taken: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
