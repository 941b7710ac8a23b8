//! Service wiring shared by all handlers.

use std::sync::Arc;

use anyhow::Context;
use stockroom_auth::{AuthResult, AuthService, HashParams, PasswordHasher, TokenIssuer, UserRepository};
use stockroom_infra::{InMemoryProductRepository, InMemoryUserRepository, PgStore, Settings};
use stockroom_products::{ProductRepository, ProductService};

pub struct AppServices {
    pub app_name: String,
    pub app_version: String,
    pub products: ProductService<Arc<dyn ProductRepository>>,
    pub auth: AuthService<Arc<dyn UserRepository>>,
}

impl AppServices {
    pub fn new(
        app_name: impl Into<String>,
        app_version: impl Into<String>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            app_version: app_version.into(),
            products: ProductService::new(products),
            auth: AuthService::new(users, hasher, tokens),
        }
    }

    /// Services over Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub async fn from_settings(settings: &Settings, hash_params: HashParams) -> anyhow::Result<Self> {
        let Some(url) = settings.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; data is kept in memory only");
            return Self::in_memory(settings, hash_params).context("failed to build services");
        };

        let store = PgStore::connect(url).await.context("failed to open postgres storage")?;
        Self::with_repositories(
            settings,
            hash_params,
            Arc::new(store.products()),
            Arc::new(store.users()),
        )
        .context("failed to build services")
    }

    /// Services backed by the in-memory repositories.
    pub fn in_memory(settings: &Settings, hash_params: HashParams) -> AuthResult<Self> {
        Self::with_repositories(
            settings,
            hash_params,
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    fn with_repositories(
        settings: &Settings,
        hash_params: HashParams,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
    ) -> AuthResult<Self> {
        let hasher = PasswordHasher::new(hash_params)?;
        let tokens = TokenIssuer::new(settings.jwt_secret.as_bytes(), settings.access_token_ttl());

        Ok(Self::new(
            settings.app_name.clone(),
            settings.app_version.clone(),
            products,
            users,
            hasher,
            tokens,
        ))
    }

    /// Run a service call on the blocking pool.
    ///
    /// Repositories may block on IO and password hashing is CPU-bound, so
    /// handlers never call services on the async executor directly.
    pub async fn run<T, F>(self: Arc<Self>, call: F) -> Result<T, tokio::task::JoinError>
    where
        F: FnOnce(&AppServices) -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || call(&self)).await
    }
}
