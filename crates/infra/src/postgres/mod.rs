//! Postgres-backed repositories.
//!
//! The repository traits are synchronous, so every call blocks on the runtime
//! handle captured by [`PgStore::connect`]. Calls must come from outside the
//! async executor (a `spawn_blocking` thread or a plain thread), and the
//! runtime must be multi-threaded so it can drive IO while the caller waits.
//!
//! Uniqueness is enforced by named constraints; a violation (SQLSTATE 23505)
//! is translated back into the domain's duplicate errors.

use std::future::Future;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::runtime::{Handle, RuntimeFlavor};

mod products;
mod users;

pub use products::PgProductRepository;
pub use users::PgUserRepository;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Serializes concurrent schema setup across processes.
const SCHEMA_LOCK_KEY: i64 = 0x5354_4f43_4b52_4f4f;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          BIGSERIAL PRIMARY KEY,
        name        VARCHAR(200) NOT NULL,
        sku         VARCHAR(50)  NOT NULL,
        stock       BIGINT       NOT NULL DEFAULT 0,
        created_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
        CONSTRAINT products_sku_key UNIQUE (sku),
        CONSTRAINT products_stock_non_negative CHECK (stock >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id               BIGSERIAL PRIMARY KEY,
        username         VARCHAR(50)  NOT NULL,
        email            VARCHAR(255) NOT NULL,
        hashed_password  VARCHAR(255) NOT NULL,
        is_active        BOOLEAN      NOT NULL DEFAULT TRUE,
        created_at       TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
        updated_at       TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
        CONSTRAINT users_username_key UNIQUE (username),
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
];

#[derive(Debug, Error)]
pub enum PgStoreError {
    #[error("postgres stores need a multi-threaded tokio runtime")]
    Runtime,

    #[error("failed to connect to postgres: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply schema: {0}")]
    Schema(#[source] sqlx::Error),
}

/// Connection pool plus the runtime handle repository calls block on.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    handle: Handle,
}

impl PgStore {
    /// Connect and make sure the tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, PgStoreError> {
        let handle = Handle::try_current().map_err(|_| PgStoreError::Runtime)?;
        if handle.runtime_flavor() != RuntimeFlavor::MultiThread {
            return Err(PgStoreError::Runtime);
        }

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(PgStoreError::Connect)?;

        let store = Self { pool, handle };
        store.ensure_schema().await?;
        tracing::info!("postgres storage ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), PgStoreError> {
        let mut tx = self.pool.begin().await.map_err(PgStoreError::Schema)?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(PgStoreError::Schema)?;
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(PgStoreError::Schema)?;
        }
        tx.commit().await.map_err(PgStoreError::Schema)
    }

    pub fn products(&self) -> PgProductRepository {
        PgProductRepository::new(self.clone())
    }

    pub fn users(&self) -> PgUserRepository {
        PgUserRepository::new(self.clone())
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.handle.block_on(fut)
    }
}

/// Name of the violated unique constraint, if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Clamp a page bound to what `LIMIT`/`OFFSET` accept.
pub(crate) fn page_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
