use thiserror::Error;

use stockroom_core::{Classify, FailureClass};

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and registration failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User '{username}' already exists")]
    UsernameTaken { username: String },

    #[error("Email '{email}' already registered")]
    EmailTaken { email: String },

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials: {0}")]
    InvalidToken(String),

    #[error("User account is inactive")]
    InactiveUser,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("user storage error: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl Classify for AuthError {
    fn class(&self) -> FailureClass {
        match self {
            AuthError::UsernameTaken { .. } | AuthError::EmailTaken { .. } => FailureClass::BadRequest,
            AuthError::InvalidCredentials | AuthError::InvalidToken(_) | AuthError::InactiveUser => {
                FailureClass::Unauthorized
            }
            AuthError::PasswordHash(_) | AuthError::Storage(_) => FailureClass::Internal,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::UsernameTaken { .. } => "username_taken",
            AuthError::EmailTaken { .. } => "email_taken",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::InactiveUser => "inactive_user",
            AuthError::PasswordHash(_) => "password_hash_error",
            AuthError::Storage(_) => "storage_error",
        }
    }
}
