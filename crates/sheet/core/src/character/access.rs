//! Ownership rules: administrators act on every character, players only on
//! their own.

use super::record::{AccountId, CharacterRecord};
use crate::error::{ErrorSeverity, SheetError};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    Admin,
    #[default]
    Player,
}

/// The actor performing an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub role: Role,
}

impl Account {
    pub fn admin(id: AccountId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            role: Role::Admin,
        }
    }

    pub fn player(id: AccountId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            role: Role::Player,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Checks that this account may read or edit `record`.
    pub fn check_access(&self, record: &CharacterRecord) -> Result<AccessGrant, AccessError> {
        if self.is_admin() {
            Ok(AccessGrant::Admin)
        } else if record.owner == self.id {
            Ok(AccessGrant::Owner)
        } else {
            Err(AccessError::NotOwner {
                account: self.id,
                owner: record.owner,
            })
        }
    }

    /// Checks that this account is an administrator.
    pub fn require_admin(&self) -> Result<(), AccessError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::AdminRequired { account: self.id })
        }
    }
}

/// Why access was granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessGrant {
    Admin,
    Owner,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessError {
    /// A player tried to act on someone else's character.
    #[error("account {account} does not own this character (owner: {owner})")]
    NotOwner { account: AccountId, owner: AccountId },

    /// A player tried an administrator-only operation.
    #[error("account {account} is not an administrator")]
    AdminRequired { account: AccountId },
}

impl SheetError for AccessError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Denied
    }

    fn error_code(&self) -> &'static str {
        match self {
            AccessError::NotOwner { .. } => "ACCESS_NOT_OWNER",
            AccessError::AdminRequired { .. } => "ACCESS_ADMIN_REQUIRED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterId;

    fn record_owned_by(owner: u64) -> CharacterRecord {
        CharacterRecord::new(CharacterId(1), AccountId(owner), "Hal")
    }

    #[test]
    fn owner_and_admin_pass() {
        let record = record_owned_by(5);
        let owner = Account::player(AccountId(5), "pia");
        let admin = Account::admin(AccountId(1), "gm");

        assert_eq!(owner.check_access(&record), Ok(AccessGrant::Owner));
        assert_eq!(admin.check_access(&record), Ok(AccessGrant::Admin));
    }

    #[test]
    fn other_player_is_denied() {
        let record = record_owned_by(5);
        let stranger = Account::player(AccountId(6), "sam");

        let err = stranger.check_access(&record).unwrap_err();
        assert_eq!(
            err,
            AccessError::NotOwner {
                account: AccountId(6),
                owner: AccountId(5)
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Denied);
        assert_eq!(err.error_code(), "ACCESS_NOT_OWNER");
    }

    #[test]
    fn only_admins_pass_admin_check() {
        assert!(Account::admin(AccountId(1), "gm").require_admin().is_ok());
        let err = Account::player(AccountId(2), "pia")
            .require_admin()
            .unwrap_err();
        assert_eq!(err.to_string(), "account 2 is not an administrator");
    }
}
