//! Token service module for the JWT lifecycle
//!
//! This module handles all token-related operations including:
//! - Signing and verifying claims (`JwtCodec`)
//! - Issuing access/refresh pairs and whitelisting refresh identifiers
//! - Single-use refresh token rotation
//! - Refresh token revocation on logout

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::{ClaimsCodec, JwtCodec};
pub use config::TokenServiceConfig;
pub use service::TokenManager;
