use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds only immutable configuration and can be shared across requests
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator with default hashing parameters.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is too short for HS256
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, TokenError> {
        Ok(Self::with_hasher(
            PasswordHasher::new(),
            TokenService::new(jwt_secret, token_ttl)?,
        ))
    }

    /// Create an authenticator from preconfigured parts.
    pub fn with_hasher(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `identity`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is unreadable)
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        identity: &str,
        password: &str,
        stored_hash: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(identity)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: self.token_service.ttl().num_seconds(),
        })
    }

    /// Reject a login for an identity that does not exist.
    ///
    /// Runs one full verification against a decoy hash built with the same
    /// parameters, so unknown identities cost as much as wrong passwords.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, self.decoy_hash());
        AuthenticationError::InvalidCredentials
    }

    fn decoy_hash(&self) -> &str {
        // An empty hash still fails closed if hashing is unavailable.
        self.decoy_hash.get_or_init(|| {
            self.password_hasher
                .hash(DECOY_PASSWORD)
                .unwrap_or_default()
        })
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, identity: &str) -> Result<String, TokenError> {
        self.token_service.issue(identity)
    }

    /// Validate a token and return the identity it carries.
    ///
    /// # Errors
    /// * `TokenError` - Token is expired, forged or malformed
    pub fn validate_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.verify(token)
    }
}
