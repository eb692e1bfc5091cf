//! Token claims and roles.

use salvo::prelude::StatusError;
use serde::{Deserialize, Serialize};

/// Claims read from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iss: String,
    pub aud: String,

    #[serde(default)]
    pub roles: Vec<String>,
}

/// Roles recognised by the API. Unknown role names are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Admin,
    User,
}

impl Role {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "Admin" => Some(Self::Admin),
            "User" => Some(Self::User),
            _ => None,
        }
    }
}

/// What a handler is about to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Listing and fetching records.
    Read,

    /// Creating, updating, deleting and exporting records.
    Write,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Principal {
    pub subject: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub(crate) fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Admins may do anything, users may only read.
    pub(crate) fn can(&self, access: Access) -> bool {
        match access {
            Access::Read => self.has_role(Role::Admin) || self.has_role(Role::User),
            Access::Write => self.has_role(Role::Admin),
        }
    }

    /// `403` unless the caller may perform `access`.
    pub(crate) fn authorize(&self, access: Access) -> Result<(), StatusError> {
        if self.can(access) {
            Ok(())
        } else {
            Err(StatusError::forbidden().brief("Insufficient role"))
        }
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            roles: claims.roles.iter().filter_map(|name| Role::parse(name)).collect(),
        }
    }
}
