use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Role carried by an identity.
///
/// The gate only establishes authentication; role checks happen in the
/// handlers that need them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of token an identity was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Identity embedded in every token.
///
/// Minted once per login or refresh and never mutated afterwards. Wire names
/// are `userId`, `email`, `role` and the optional `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityClaim {
    #[serde(rename = "userId")]
    pub user_id: String,

    pub email: String,

    pub role: Role,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,
}

impl IdentityClaim {
    /// Create an identity without an explicit token kind.
    pub fn new(user_id: impl ToString, email: impl ToString, role: Role) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
            kind: None,
        }
    }

    /// Set the token kind.
    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Effective token kind; an absent kind means access.
    pub fn kind(&self) -> TokenKind {
        self.kind.unwrap_or(TokenKind::Access)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Full token payload: the identity plus issuance and expiry.
///
/// Decoding is strict. Unknown fields, missing required fields and unknown
/// role or kind values all fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: String,

    pub email: String,

    pub role: Role,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Build a payload for `identity` issued at `issued_at` and valid for `ttl`.
    pub fn new(identity: &IdentityClaim, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
            role: identity.role,
            kind: identity.kind,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// `exp` is the first whole second at which the token is no longer valid.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn into_identity(self) -> IdentityClaim {
        IdentityClaim {
            user_id: self.user_id,
            email: self.email,
            role: self.role,
            kind: self.kind,
        }
    }
}
