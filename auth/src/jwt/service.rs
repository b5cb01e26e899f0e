use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed, time-limited access tokens.
///
/// Tokens are HS256 JWTs carrying `{sub, iat, exp}`. Any process holding the
/// same secret can verify a token; nothing is stored server-side and issued
/// tokens cannot be revoked before they expire.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Minimum secret length for HS256.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Signing key, at least 32 bytes
    /// * `ttl` - Lifetime of every issued token
    ///
    /// # Errors
    /// * `WeakSecret` - Secret shorter than 32 bytes
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        })
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    pub fn issue(&self, identity: &str) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a token for `identity` as if the current time were `now`.
    pub fn issue_at(&self, identity: &str, now: i64) -> Result<String, TokenError> {
        let claims = Claims::new(identity, now, self.ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the identity it carries.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the signing key
    /// * `Expired` - Current time is past the token's expiry
    /// * `Malformed` - Token cannot be parsed or lacks required claims
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<String, TokenError> {
        self.decode_at(token, now).map(|claims| claims.sub)
    }

    /// Verify a token and return its full claims.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the supplied clock below, without leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
