use serde::{Deserialize, Serialize};

use crate::users::model::Role;

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,    // user ID
    pub role: Role, // role at issuance time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>, // issued at (unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>, // expires at (unix timestamp); enforced when present
}

/// Identity of the caller for the current request, taken from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl From<Claims> for Actor {
    fn from(c: Claims) -> Self {
        Self {
            id: c.id,
            role: c.role,
        }
    }
}
