//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the API service:
//! - Password hashing (Argon2id, salted, fail-closed verification)
//! - Signed, time-limited access tokens (HS256 JWT)
//! - Authentication coordination
//!
//! Everything here is a pure function of its inputs plus configuration fixed
//! at construction, so a single instance can be shared by concurrent requests.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::days(2)).unwrap();
//! let token = tokens.issue("a@b.com").unwrap();
//! assert_eq!(tokens.verify(&token).unwrap(), "a@b.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::days(2)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("a@b.com", "password123", &hash).unwrap();
//!
//! // Validate token
//! let identity = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(identity, "a@b.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
