//! Common error infrastructure for sheet-core and the crates built on it.
//!
//! The rules engine itself never fails: resolvers are total and resource
//! operations clamp. Errors only arise at the edges (access checks here,
//! storage in `sheet-store`), and all of them share the [`SheetError`]
//! classification so callers can pick a handling strategy uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Denied**: the actor is not allowed to perform the operation
/// - **Missing**: a referenced record or catalog entry does not exist
/// - **Invalid**: the request itself is malformed and should not be retried as-is
/// - **Internal**: storage or lock failure that needs investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Permission failure. Retrying with the same actor will fail again.
    Denied,

    /// The target does not exist (deleted character, unknown catalog id).
    Missing,

    /// Malformed request.
    Invalid,

    /// Unexpected failure below the rules layer (I/O, poisoned lock, corrupt file).
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Denied => "denied",
            Self::Missing => "missing",
            Self::Invalid => "invalid",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error should be reported to the caller as-is.
    pub const fn is_client_facing(&self) -> bool {
        matches!(self, Self::Denied | Self::Missing | Self::Invalid)
    }

    /// Returns true if this error indicates a bug or an environment problem.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all sheet errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by how the caller should react, not by impact
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
