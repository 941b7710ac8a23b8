//! Product error taxonomy.

use thiserror::Error;

use stockroom_core::{Classify, FailureClass, ProductId};

/// Result type used across the products crate.
pub type ProductResult<T> = Result<T, ProductError>;

/// Everything that can go wrong in a product operation.
///
/// Every variant carries the context a caller needs to build a response
/// without parsing the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product with ID {product_id} not found")]
    ProductNotFound { product_id: ProductId },

    #[error("Product with SKU '{sku}' already exists")]
    DuplicateSku { sku: String },

    /// An amount, quantity, or required text field failed validation.
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: i64, reason: String },

    #[error("Insufficient stock: current={current_stock}, requested={requested_amount}")]
    InsufficientStock {
        current_stock: i64,
        requested_amount: i64,
    },

    /// Storage failed for a reason that is not a domain rule.
    #[error("product storage error: {0}")]
    Storage(String),
}

/// Discriminant of [`ProductError`], for callers that only need to switch on
/// the kind of failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProductErrorKind {
    ProductNotFound,
    DuplicateSku,
    InvalidAmount,
    InsufficientStock,
    Storage,
}

impl ProductError {
    pub fn not_found(product_id: ProductId) -> Self {
        Self::ProductNotFound { product_id }
    }

    pub fn duplicate_sku(sku: impl Into<String>) -> Self {
        Self::DuplicateSku { sku: sku.into() }
    }

    pub fn invalid_amount(amount: i64, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            amount,
            reason: reason.into(),
        }
    }

    pub fn insufficient_stock(current_stock: i64, requested_amount: i64) -> Self {
        Self::InsufficientStock {
            current_stock,
            requested_amount,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn kind(&self) -> ProductErrorKind {
        match self {
            ProductError::ProductNotFound { .. } => ProductErrorKind::ProductNotFound,
            ProductError::DuplicateSku { .. } => ProductErrorKind::DuplicateSku,
            ProductError::InvalidAmount { .. } => ProductErrorKind::InvalidAmount,
            ProductError::InsufficientStock { .. } => ProductErrorKind::InsufficientStock,
            ProductError::Storage(_) => ProductErrorKind::Storage,
        }
    }
}

impl Classify for ProductError {
    fn class(&self) -> FailureClass {
        match self.kind() {
            ProductErrorKind::ProductNotFound => FailureClass::NotFound,
            ProductErrorKind::DuplicateSku
            | ProductErrorKind::InvalidAmount
            | ProductErrorKind::InsufficientStock => FailureClass::BadRequest,
            ProductErrorKind::Storage => FailureClass::Internal,
        }
    }

    fn code(&self) -> &'static str {
        match self.kind() {
            ProductErrorKind::ProductNotFound => "product_not_found",
            ProductErrorKind::DuplicateSku => "duplicate_sku",
            ProductErrorKind::InvalidAmount => "invalid_amount",
            ProductErrorKind::InsufficientStock => "insufficient_stock",
            ProductErrorKind::Storage => "storage_error",
        }
    }
}
