//! Registration, login, and token-to-user resolution.

use chrono::{DateTime, Utc};

use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::token::{AccessToken, TokenIssuer};
use crate::user::User;

#[derive(Debug, Clone)]
pub struct AuthService<R> {
    repository: R,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Register a new active account.
    pub fn register(&self, username: &str, email: &str, password: &str) -> AuthResult<User> {
        if self.repository.get_by_username(username)?.is_some() {
            return Err(AuthError::UsernameTaken {
                username: username.to_string(),
            });
        }
        if self.repository.get_by_email(email)?.is_some() {
            return Err(AuthError::EmailTaken {
                email: email.to_string(),
            });
        }

        let hashed = self.hasher.hash(password)?;
        let user = self.repository.create(User::new(username, email, hashed))?;
        tracing::info!(user_id = ?user.id_typed(), username, "user registered");
        Ok(user)
    }

    /// Returns the user when the credentials match, `None` otherwise.
    ///
    /// An unknown username and a wrong password are indistinguishable.
    pub fn authenticate(&self, username: &str, password: &str) -> AuthResult<Option<User>> {
        let Some(user) = self.repository.get_by_username(username)? else {
            return Ok(None);
        };
        if !self.hasher.verify(password, user.hashed_password()) {
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Authenticate and issue an access token.
    pub fn login(&self, username: &str, password: &str, now: DateTime<Utc>) -> AuthResult<AccessToken> {
        let user = self
            .authenticate(username, password)?
            .ok_or(AuthError::InvalidCredentials)?;
        if !user.is_active() {
            return Err(AuthError::InactiveUser);
        }
        self.issue_token(&user, now)
    }

    pub fn issue_token(&self, user: &User, now: DateTime<Utc>) -> AuthResult<AccessToken> {
        self.tokens.issue(user.username(), now)
    }

    /// Resolve a bearer token to the active user it was issued to.
    pub fn current_user(&self, token: &str, now: DateTime<Utc>) -> AuthResult<User> {
        let claims = self.tokens.validate(token, now)?;
        let user = self
            .repository
            .get_by_username(&claims.sub)?
            .ok_or_else(|| AuthError::invalid_token("subject no longer exists"))?;
        if !user.is_active() {
            return Err(AuthError::InactiveUser);
        }
        Ok(user)
    }

    pub fn current_user_now(&self, token: &str) -> AuthResult<User> {
        self.current_user(token, Utc::now())
    }
}
