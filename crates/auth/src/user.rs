//! User entity for authentication.
//!
//! Users carry no business behavior beyond storage and retrieval; they exist
//! so that a caller can be identified before mutating inventory.

use chrono::{DateTime, Utc};

use stockroom_core::{Entity, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A registered account.
///
/// # Invariants
/// - `hashed_password` is a PHC-formatted Argon2 hash, never a plaintext.
/// - `username` and `email` are unique across all users (enforced by storage).
#[derive(Clone)]
pub struct User {
    id: Option<UserId>,
    username: String,
    email: String,
    hashed_password: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// A new, active, not-yet-persisted account.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate an account from storage.
    pub fn from_parts(
        id: Option<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            is_active,
            created_at,
            updated_at,
        }
    }

    /// Assign storage identity. Both timestamps are reset to `at`.
    pub fn with_identity(mut self, id: UserId, at: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub fn id_typed(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn hashed_password(&self) -> &str {
        &self.hashed_password
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Option<UserId> {
        self.id
    }
}

// The password hash stays out of logs.
impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}
