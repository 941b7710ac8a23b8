use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access-token claims (transport-agnostic).
///
/// Timestamps are Unix seconds, as registered JWT claims expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the username the token was issued to.
    pub sub: String,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Expiration (Unix seconds).
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate claim timestamps against `now`.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`TokenIssuer::validate`](crate::TokenIssuer::validate).
pub fn validate_claims(claims: &AccessClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let (Some(issued_at), Some(expires_at)) = (claims.issued_at(), claims.expires_at()) else {
        return Err(TokenValidationError::InvalidTimeWindow);
    };
    if expires_at <= issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    // Whole-second precision on `iat`; compare at the same granularity.
    if now.timestamp() < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims_at(now: DateTime<Utc>, ttl: Duration) -> AccessClaims {
        AccessClaims::new("alice", now, now + ttl)
    }

    #[test]
    fn accepts_claims_inside_window() {
        let now = Utc::now();
        let claims = claims_at(now, Duration::minutes(30));
        assert_eq!(validate_claims(&claims, now + Duration::minutes(1)), Ok(()));
    }

    #[test]
    fn rejects_expired_claims() {
        let now = Utc::now();
        let claims = claims_at(now, Duration::minutes(30));
        assert_eq!(
            validate_claims(&claims, now + Duration::minutes(31)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn rejects_future_claims() {
        let now = Utc::now();
        let claims = claims_at(now + Duration::minutes(5), Duration::minutes(30));
        assert_eq!(validate_claims(&claims, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn rejects_inverted_window() {
        let now = Utc::now();
        let claims = AccessClaims::new("alice", now, now - Duration::seconds(1));
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
