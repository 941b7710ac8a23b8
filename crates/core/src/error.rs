//! Boundary-agnostic failure classification.
//!
//! Each domain crate owns its own error enum. The boundary layer does not
//! match on those enums directly; it asks for a [`FailureClass`] and maps that
//! to a transport-level response.

/// Coarse class of a domain failure, as seen by a caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// The addressed record does not exist.
    NotFound,
    /// The request was understood but violates a business rule.
    BadRequest,
    /// The caller's identity could not be established.
    Unauthorized,
    /// Anything unclassified (storage faults, hashing faults, ...).
    Internal,
}

impl FailureClass {
    /// Stable lowercase label, suitable for logs and error payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureClass::NotFound => "not_found",
            FailureClass::BadRequest => "bad_request",
            FailureClass::Unauthorized => "unauthorized",
            FailureClass::Internal => "internal",
        }
    }

    pub fn is_client_error(self) -> bool {
        !matches!(self, FailureClass::Internal)
    }
}

impl core::fmt::Display for FailureClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every domain error the boundary layer may receive.
pub trait Classify {
    fn class(&self) -> FailureClass;

    /// Short machine-readable code for the specific failure.
    fn code(&self) -> &'static str;
}
