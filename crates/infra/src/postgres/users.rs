use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use stockroom_auth::{AuthError, AuthResult, User, UserRepository};
use stockroom_core::UserId;

use super::{PgStore, unique_violation};

const COLUMNS: &str = "id, username, email, hashed_password, is_active, created_at, updated_at";

/// Account table backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    store: PgStore,
}

impl PgUserRepository {
    pub fn new(store: PgStore) -> Self {
        Self { store }
    }
}

fn storage(err: sqlx::Error) -> AuthError {
    AuthError::storage(err.to_string())
}

/// Translate a violated unique constraint into the matching account conflict.
fn conflict(constraint: &str, user: &User) -> AuthError {
    if constraint == "users_username_key" {
        AuthError::UsernameTaken {
            username: user.username().to_string(),
        }
    } else {
        AuthError::EmailTaken {
            email: user.email().to_string(),
        }
    }
}

fn decode(row: &PgRow) -> AuthResult<User> {
    let id: i64 = row.try_get("id").map_err(storage)?;
    let username: String = row.try_get("username").map_err(storage)?;
    let email: String = row.try_get("email").map_err(storage)?;
    let hashed_password: String = row.try_get("hashed_password").map_err(storage)?;
    let is_active: bool = row.try_get("is_active").map_err(storage)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(storage)?;

    Ok(User::from_parts(
        Some(UserId::from_i64(id)),
        username,
        email,
        hashed_password,
        is_active,
        created_at,
        updated_at,
    ))
}

impl PgUserRepository {
    fn find_by(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE {column} = $1");
        let row = self
            .store
            .block_on(sqlx::query(&sql).bind(value).fetch_optional(self.store.pool()))
            .map_err(storage)?;
        row.as_ref().map(decode).transpose()
    }
}

impl UserRepository for PgUserRepository {
    fn create(&self, user: User) -> AuthResult<User> {
        let sql = format!(
            "INSERT INTO users (username, email, hashed_password, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) RETURNING {COLUMNS}"
        );
        let row = self
            .store
            .block_on(
                sqlx::query(&sql)
                    .bind(user.username())
                    .bind(user.email())
                    .bind(user.hashed_password())
                    .bind(user.is_active())
                    .bind(Utc::now())
                    .fetch_one(self.store.pool()),
            )
            .map_err(|err| match unique_violation(&err) {
                Some(constraint) => conflict(&constraint, &user),
                None => storage(err),
            })?;
        decode(&row)
    }

    fn get_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        self.find_by("username", username)
    }

    fn get_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        self.find_by("email", email)
    }
}
