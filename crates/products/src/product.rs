use chrono::{DateTime, Utc};

use stockroom_core::{Entity, ProductId};

use crate::error::{ProductError, ProductResult};
use crate::sku::Sku;

/// Threshold used by [`Product::is_low_stock_default`].
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Entity: Product.
///
/// # Invariants
/// - `name` is never blank.
/// - `stock` is never negative.
/// - every successful mutation refreshes `updated_at`.
///
/// Fields are private; the only way to change stock is through the guarded
/// methods below, and a failed call leaves the product untouched.
#[derive(Debug, Clone)]
pub struct Product {
    id: Option<ProductId>,
    name: String,
    sku: Sku,
    stock: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new, not-yet-persisted product.
    pub fn new(name: impl Into<String>, sku: Sku, stock: i64) -> ProductResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        ensure_stock(stock, "Initial stock cannot be negative")?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            name,
            sku,
            stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a product from storage.
    pub fn from_parts(
        id: Option<ProductId>,
        name: impl Into<String>,
        sku: Sku,
        stock: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ProductResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        ensure_stock(stock, "Stock cannot be negative")?;
        Ok(Self {
            id,
            name,
            sku,
            stock,
            created_at,
            updated_at,
        })
    }

    /// Assign storage identity. Both timestamps are reset to `at`.
    pub fn with_identity(mut self, id: ProductId, at: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub fn id_typed(&self) -> Option<ProductId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn increment_stock(&mut self, amount: i64) -> ProductResult<()> {
        if amount <= 0 {
            return Err(ProductError::invalid_amount(
                amount,
                "Increment amount must be positive",
            ));
        }
        let next = self
            .stock
            .checked_add(amount)
            .ok_or_else(|| ProductError::invalid_amount(amount, "Increment would overflow stock"))?;

        self.stock = next;
        self.touch();
        Ok(())
    }

    pub fn decrement_stock(&mut self, amount: i64) -> ProductResult<()> {
        if amount <= 0 {
            return Err(ProductError::invalid_amount(
                amount,
                "Decrement amount must be positive",
            ));
        }
        if self.stock - amount < 0 {
            return Err(ProductError::insufficient_stock(self.stock, amount));
        }

        self.stock -= amount;
        self.touch();
        Ok(())
    }

    /// Replace name and/or stock.
    ///
    /// Both arguments are validated before either is applied. `updated_at` is
    /// refreshed on every successful call, including one with no arguments.
    pub fn update_details(&mut self, name: Option<&str>, stock: Option<i64>) -> ProductResult<()> {
        if let Some(name) = name {
            ensure_name(name)?;
        }
        if let Some(stock) = stock {
            ensure_stock(stock, "Stock cannot be negative")?;
        }

        if let Some(name) = name {
            self.name = name.to_string();
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        self.touch();
        Ok(())
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock < threshold
    }

    pub fn is_low_stock_default(&self) -> bool {
        self.is_low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn ensure_name(name: &str) -> ProductResult<()> {
    if name.trim().is_empty() {
        return Err(ProductError::invalid_amount(0, "Product name cannot be empty"));
    }
    Ok(())
}

fn ensure_stock(stock: i64, reason: &str) -> ProductResult<()> {
    if stock < 0 {
        return Err(ProductError::invalid_amount(stock, reason));
    }
    Ok(())
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }
}

/// Identity + business-key equality: name and stock are ignored.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.sku == other.sku
    }
}

impl Eq for Product {}
