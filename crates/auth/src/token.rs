//! HS256 access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::claims::{AccessClaims, validate_claims};
use crate::error::{AuthError, AuthResult};

/// Token type reported alongside every issued token.
pub const TOKEN_TYPE: &str = "bearer";

/// An issued access token, shaped for the login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Signs and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> AuthResult<AccessToken> {
        let claims = AccessClaims::new(subject, now, now + self.ttl);
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::invalid_token(e.to_string()))?;
        Ok(AccessToken {
            access_token: token,
            token_type: TOKEN_TYPE,
        })
    }

    /// Verify the signature, then check the claim window against `now`.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> AuthResult<AccessClaims> {
        // Time checks are done by `validate_claims` so that `now` is injectable.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::invalid_token(e.to_string()))?;
        validate_claims(&data.claims, now).map_err(|e| AuthError::invalid_token(e.to_string()))?;
        Ok(data.claims)
    }
}

impl core::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
