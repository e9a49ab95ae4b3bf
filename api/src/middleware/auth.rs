//! Access token authentication middleware for protecting API endpoints.
//!
//! The token is read from the `access-token` cookie, falling back to an
//! `Authorization: Bearer` header. Verification is signature and expiry only;
//! access tokens are never looked up in the whitelist.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::{header::AUTHORIZATION, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use snip_core::{
    domain::entities::TokenClaims,
    errors::TokenResult,
    repositories::WhitelistStore,
    services::{ClaimsCodec, TokenManager},
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::handlers::error_handler::{handle_token_error, missing_token_response};

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from the access token
    pub user_id: Uuid,
    /// Identifier of the presented access token
    pub jti: Uuid,
}

impl From<TokenClaims> for AuthContext {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id(),
            jti: claims.jti,
        }
    }
}

/// Anything able to verify an access token
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access(&self, token: &str) -> TokenResult<TokenClaims>;
}

impl<C: ClaimsCodec, S: WhitelistStore> AccessTokenVerifier for TokenManager<C, S> {
    fn verify_access(&self, token: &str) -> TokenResult<TokenClaims> {
        TokenManager::verify_access(self, token)
    }
}

/// Access token authentication middleware factory
#[derive(Clone)]
pub struct AccessAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl AccessAuth {
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Access token authentication middleware service
pub struct AccessAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for AccessAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let Some(token) = extract_access_token(&req) else {
                let response = missing_token_response(StatusCode::UNAUTHORIZED, ACCESS_TOKEN_COOKIE);
                return Ok(req.into_response(response).map_into_right_body());
            };

            match verifier.verify_access(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthContext::from(claims));
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => Ok(req
                    .into_response(handle_token_error(&error))
                    .map_into_right_body()),
            }
        })
    }
}

/// Reads the access token from its cookie, then from a Bearer header
fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
