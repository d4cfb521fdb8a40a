//! Error types raised by stores and the sheet service.

use sheet_core::{AccessError, CatalogId, CharacterId, ErrorSeverity, InstanceId, SheetError};
use thiserror::Error;

/// Which catalog list an id was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CatalogKind {
    Item,
    ItemProperty,
    Skill,
    Spell,
}

/// Errors surfaced by store implementations and [`crate::SheetService`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("character store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("character {id} not found")]
    NotFound { id: CharacterId },

    #[error("character {id} already exists")]
    AlreadyExists { id: CharacterId },

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("unknown {kind} {id}")]
    UnknownCatalogEntry { kind: CatalogKind, id: CatalogId },

    #[error("character {character} has no {kind} {id}")]
    NotAssociated {
        character: CharacterId,
        kind: CatalogKind,
        id: CatalogId,
    },

    #[error("character {character} has no {kind} instance {instance}")]
    UnknownInstance {
        character: CharacterId,
        kind: CatalogKind,
        instance: InstanceId,
    },

    #[error("item instance {instance} of character {character} has no uses counter")]
    NoUsesCounter {
        character: CharacterId,
        instance: InstanceId,
    },
}

impl SheetError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        use StoreError::*;
        match self {
            LockPoisoned | Io(_) | Json(_) => ErrorSeverity::Internal,
            NotFound { .. }
            | UnknownCatalogEntry { .. }
            | NotAssociated { .. }
            | UnknownInstance { .. } => ErrorSeverity::Missing,
            AlreadyExists { .. } | NoUsesCounter { .. } => ErrorSeverity::Invalid,
            Access(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use StoreError::*;
        match self {
            LockPoisoned => "STORE_LOCK_POISONED",
            Io(_) => "STORE_IO",
            Json(_) => "STORE_JSON",
            NotFound { .. } => "STORE_NOT_FOUND",
            AlreadyExists { .. } => "STORE_ALREADY_EXISTS",
            Access(err) => err.error_code(),
            UnknownCatalogEntry { .. } => "STORE_UNKNOWN_CATALOG_ENTRY",
            NotAssociated { .. } => "STORE_NOT_ASSOCIATED",
            UnknownInstance { .. } => "STORE_UNKNOWN_INSTANCE",
            NoUsesCounter { .. } => "STORE_NO_USES_COUNTER",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::AccountId;

    #[test]
    fn classification() {
        let missing = StoreError::NotFound { id: CharacterId(4) };
        assert_eq!(missing.severity(), ErrorSeverity::Missing);
        assert_eq!(missing.to_string(), "character 4 not found");

        let denied = StoreError::from(AccessError::AdminRequired {
            account: AccountId(2),
        });
        assert_eq!(denied.severity(), ErrorSeverity::Denied);
        assert_eq!(denied.error_code(), "ACCESS_ADMIN_REQUIRED");

        let unknown = StoreError::UnknownCatalogEntry {
            kind: CatalogKind::ItemProperty,
            id: CatalogId(9),
        };
        assert_eq!(unknown.to_string(), "unknown item_property #9");
        assert!(StoreError::LockPoisoned.severity().is_internal());

        let instance = StoreError::UnknownInstance {
            character: CharacterId(1),
            kind: CatalogKind::Item,
            instance: InstanceId(3),
        };
        assert_eq!(instance.to_string(), "character 1 has no item instance 3");
        assert_eq!(instance.error_code(), "STORE_UNKNOWN_INSTANCE");
    }
}
