//! Products domain module.
//!
//! This crate contains the stock-keeping rules for products, implemented as
//! plain domain logic (no IO, no HTTP, no concrete storage). Storage is reached
//! only through [`ProductRepository`].

pub mod error;
pub mod product;
pub mod repository;
pub mod service;
pub mod sku;

pub use error::{ProductError, ProductErrorKind, ProductResult};
pub use product::{DEFAULT_LOW_STOCK_THRESHOLD, Product};
pub use repository::ProductRepository;
pub use service::{DEFAULT_ADJUSTMENT, DEFAULT_PAGE_LIMIT, ProductService};
pub use sku::Sku;
