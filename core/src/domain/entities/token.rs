//! Token value objects for JWT-based authentication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "url-shortener";

/// Kind of a token, serialized into the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential, verified by signature and expiry only
    Access,
    /// Whitelisted, single-use credential exchanged for a new pair
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Identifies the principal a token was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Stable user identifier
    pub uid: Uuid,
}

impl UserClaims {
    pub fn new(uid: Uuid) -> Self {
        Self { uid }
    }
}

/// Full claim set carried by every signed token
///
/// Fixed at issuance and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Principal the token was issued for
    #[serde(flatten)]
    pub user: UserClaims,

    /// Access or refresh
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Unique token identifier, the whitelist key for refresh tokens
    pub jti: Uuid,

    /// Issuer
    pub iss: String,

    /// Expiration timestamp (seconds since the epoch)
    pub exp: i64,
}

impl TokenClaims {
    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Uuid {
        self.user.uid
    }

    /// Checks if the token is of the given kind
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Access and refresh tokens issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access: String,

    /// Signed refresh token
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: String, refresh: String) -> Self {
        Self { access, refresh }
    }
}
