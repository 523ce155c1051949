//! User role enum.

use buildmatch_core::error::CoreError;
use buildmatch_core::roles;
use serde::{Deserialize, Serialize};

/// Role of a user, stored as a lowercase string in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
    Engineer,
}

impl Role {
    /// Wire name as stored in the document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Admin => roles::ROLE_ADMIN,
            Self::Client => roles::ROLE_CLIENT,
            Self::Engineer => roles::ROLE_ENGINEER,
        }
    }

    /// Parse a raw role string (already validated at the form boundary).
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        roles::validate_role(name)?;
        match name {
            roles::ROLE_ADMIN => Ok(Self::Admin),
            roles::ROLE_CLIENT => Ok(Self::Client),
            _ => Ok(Self::Engineer),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
