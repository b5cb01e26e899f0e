use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// The subject is the caller's identity (an email address). `iat` and `exp`
/// are Unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity of the principal)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `identity` issued at `issued_at`, valid for `ttl`.
    pub fn new(identity: impl ToString, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: identity.to_string(),
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// Create claims issued now.
    pub fn issued_now(identity: impl ToString, ttl: Duration) -> Self {
        Self::new(identity, Utc::now().timestamp(), ttl)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
