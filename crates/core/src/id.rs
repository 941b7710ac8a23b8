//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are storage-assigned sequence numbers. They are never minted by
//! the domain itself, which is why there is no `new()`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a product record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a user account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// An identifier string could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {input:?}")]
pub struct InvalidId {
    pub kind: &'static str,
    pub input: String,
}

macro_rules! impl_sequence_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn from_i64(value: i64) -> Self {
                Self(value)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|_| InvalidId {
                    kind: $name,
                    input: s.to_string(),
                })
            }
        }
    };
}

impl_sequence_newtype!(ProductId, "ProductId");
impl_sequence_newtype!(UserId, "UserId");
