//! Domain layer containing the token value objects.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{TokenClaims, TokenKind, TokenPair, UserClaims, JWT_ISSUER};
