// auth/mod.rs - Session token issuance and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cookie;
pub mod password;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

/// Outcome of verifying a session token.
///
/// Every failure (bad signature, malformed token, expiry) collapses into
/// `Invalid`; callers never learn why a token was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid(Claims),
    Invalid,
}

impl Verification {
    pub fn claims(self) -> Option<Claims> {
        match self {
            Verification::Valid(claims) => Some(claims),
            Verification::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token expiry out of range")]
    ExpiryOutOfRange,

    #[error("JWT generation error: {0}")]
    TokenGeneration(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Issues and verifies HS256 session tokens with a secret fixed at construction.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthority {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, username: &str, user_id: i32) -> Result<String, AuthError> {
        self.issue_at(username, user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, username: &str, user_id: i32, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
            user_id,
            iat: now.timestamp(),
            exp: now.checked_add_signed(self.ttl).ok_or(AuthError::ExpiryOutOfRange)?.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn verify(&self, token: &str) -> Verification {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                return Verification::Invalid;
            }
        };

        // Valid strictly before expiry
        if claims.exp <= Utc::now().timestamp() {
            return Verification::Invalid;
        }

        Verification::Valid(claims)
    }
}
