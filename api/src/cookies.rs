//! Token cookie transport
//!
//! Access and refresh tokens travel as cookies scoped to the API path.
//! `Secure` and `HttpOnly` are only set in production so local clients can
//! work over plain HTTP.

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::{HttpRequest, HttpResponseBuilder};
use snip_core::domain::entities::TokenPair;
use snip_shared::config::AppConfig;

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";

/// Attributes applied to both token cookies
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub path: String,
    pub secure: bool,
    /// Max-Age of the access cookie in seconds
    pub access_max_age: i64,
    /// Max-Age of the refresh cookie in seconds
    pub refresh_max_age: i64,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl CookieSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            path: config.server.cookie_path.clone(),
            secure: config.secure_cookies(),
            access_max_age: config.jwt.access_token_expiry,
            refresh_max_age: config.jwt.refresh_token_expiry,
        }
    }

    fn build(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name, value)
            .path(self.path.clone())
            .secure(self.secure)
            .http_only(self.secure)
            .max_age(max_age)
            .finish()
    }
}

/// Attaches both tokens of `pair` to the response
pub fn set_token_cookies(
    response: &mut HttpResponseBuilder,
    pair: &TokenPair,
    settings: &CookieSettings,
) {
    response.cookie(settings.build(
        ACCESS_TOKEN_COOKIE,
        pair.access.clone(),
        Duration::seconds(settings.access_max_age),
    ));
    response.cookie(settings.build(
        REFRESH_TOKEN_COOKIE,
        pair.refresh.clone(),
        Duration::seconds(settings.refresh_max_age),
    ));
}

/// Expires both token cookies on the client
pub fn clear_token_cookies(response: &mut HttpResponseBuilder, settings: &CookieSettings) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        response.cookie(settings.build(name, String::new(), Duration::ZERO));
    }
}

/// Reads a non-empty cookie value from the request
pub fn read_cookie(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
