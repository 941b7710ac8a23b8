//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod in_memory;
pub mod postgres;

#[cfg(test)]
mod contract;

pub use config::{ConfigError, Settings};
pub use in_memory::{InMemoryProductRepository, InMemoryUserRepository};
pub use postgres::{PgProductRepository, PgStore, PgStoreError, PgUserRepository};
