//! Authentication route handlers
//!
//! This module contains the token lifecycle endpoints:
//! - Token refresh (rotation of the refresh cookie)
//! - Logout (revocation of the refresh cookie)
//! - Current principal lookup behind the access token middleware

pub mod logout;
pub mod me;
pub mod refresh;

use std::sync::Arc;

use snip_core::services::{JwtCodec, TokenManager};

use crate::cookies::CookieSettings;

/// Application state shared by the auth handlers
pub struct AppState<S> {
    /// Token lifecycle manager
    pub tokens: Arc<TokenManager<JwtCodec, S>>,
    /// Attributes for the token cookies
    pub cookies: CookieSettings,
}

impl<S> AppState<S> {
    pub fn new(tokens: Arc<TokenManager<JwtCodec, S>>, cookies: CookieSettings) -> Self {
        Self { tokens, cookies }
    }
}
