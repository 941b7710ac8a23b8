//! `stockroom-auth`: user accounts, password hashing, and access tokens.
//!
//! This crate is intentionally decoupled from HTTP and storage. Product
//! operations never see a user; the HTTP layer uses this crate to decide
//! whether a caller may reach them at all.

pub mod claims;
pub mod error;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod user;

pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use error::{AuthError, AuthResult};
pub use password::{HashParams, PasswordHasher};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::{AccessToken, TOKEN_TYPE, TokenIssuer};
pub use user::User;
