//! In-memory repositories.
//!
//! Each store keeps its rows behind a single `RwLock`, so uniqueness checks
//! and inserts happen under the same write guard. That makes these stores the
//! final authority on uniqueness.

mod products;
mod users;

pub use products::InMemoryProductRepository;
pub use users::InMemoryUserRepository;
