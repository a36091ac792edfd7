use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the account's username.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: i64,
}

/// Why verification of a presented token failed.
///
/// Callers at the HTTP boundary must not forward these distinctions to
/// clients; the authorization gate collapses them all into a single 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not match the server key (tampered or foreign token).
    InvalidSignature,
    /// The token's `exp` claim is in the past relative to the supplied clock.
    Expired,
    /// The token could not be parsed as a JWT at all.
    Malformed,
}

/// Issues and verifies HS256 bearer tokens.
///
/// Constructed once at startup from process configuration and passed
/// explicitly to whoever needs it; this module never reads the environment.
/// Tokens are stateless: the server keeps no record of what it has issued,
/// so there is no revocation, and expiry is checked lazily at verification.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Signs a claim set `{sub: username, exp: now + TTL}`.
    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: username.to_string(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry of a presented token against the supplied
    /// clock and returns the decoded claims.
    ///
    /// Expiry is evaluated here with zero leeway rather than by the JWT
    /// library so that the cutoff is exact: a token is rejected iff
    /// `now > exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
