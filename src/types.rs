/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named permission attached to an authenticated account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the JSON API under /products is guarded
///
/// `RoleBased` applies the page split to the API as well: reads need USER,
/// deletes need ADMIN. `Authenticated` only asks for a valid session, which
/// lets any logged-in account delete through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestAccess {
    RoleBased,
    Authenticated,
}

impl FromStr for RestAccess {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "role_based" | "role-based" | "roles" => Ok(RestAccess::RoleBased),
            "authenticated" | "any" => Ok(RestAccess::Authenticated),
            other => Err(format!("unknown REST access policy '{}'", other)),
        }
    }
}
