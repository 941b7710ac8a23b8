use serde::{Deserialize, Serialize};

use stockroom_core::ValueObject;

use crate::error::ProductError;

/// Stock Keeping Unit: the business key of a product.
///
/// Always trimmed, upper-cased, and non-empty. `"  test-001 "` and
/// `"TEST-001"` parse to the same SKU.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn parse(raw: &str) -> Result<Self, ProductError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProductError::invalid_amount(0, "Product SKU cannot be empty"));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl ValueObject for Sku {}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for Sku {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
