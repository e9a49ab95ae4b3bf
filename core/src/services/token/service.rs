//! Token lifecycle manager
//!
//! A refresh token identifier is either ISSUED (present in the whitelist) or
//! dead. Consumption by rotation, revocation by logout and TTL expiry all
//! remove the entry, and the manager treats those outcomes identically.

use std::time::Duration as StdDuration;

use uuid::Uuid;

use crate::domain::entities::{TokenClaims, TokenKind, TokenPair, UserClaims};
use crate::errors::{TokenError, TokenResult};
use crate::repositories::WhitelistStore;

use super::codec::ClaimsCodec;

/// Issues, rotates and revokes token pairs
///
/// Holds no mutable state of its own; share it behind an `Arc` across
/// request handlers.
pub struct TokenManager<C, S> {
    codec: C,
    store: S,
}

impl<C: ClaimsCodec, S: WhitelistStore> TokenManager<C, S> {
    pub fn new(codec: C, store: S) -> Self {
        Self { codec, store }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Issues a fresh access/refresh pair for `user_id`
    ///
    /// Both tokens are signed before the refresh identifier is registered, so
    /// a signing failure leaves the whitelist untouched.
    ///
    /// # Errors
    ///
    /// * `SigningFailure` - either token could not be signed
    /// * `StoreUnavailable` - the refresh identifier could not be registered
    pub async fn issue_pair(&self, user_id: Uuid) -> TokenResult<TokenPair> {
        let user = UserClaims::new(user_id);
        let access_id = Uuid::new_v4();
        let refresh_id = Uuid::new_v4();

        let access = self.codec.encode(&user, TokenKind::Access, access_id)?;
        let refresh = self.codec.encode(&user, TokenKind::Refresh, refresh_id)?;

        self.store
            .register(refresh_id, self.whitelist_ttl())
            .await?;

        tracing::debug!(
            user_id = %user_id,
            access_jti = %access_id,
            refresh_jti = %refresh_id,
            "issued token pair"
        );
        Ok(TokenPair::new(access, refresh))
    }

    /// Exchanges a whitelisted refresh token for a new pair
    ///
    /// The old identifier is consumed before the new pair is issued. If
    /// issuance then fails, the old token stays dead.
    ///
    /// # Errors
    ///
    /// * decode failures of the presented token, unchanged
    /// * `RefreshNotWhitelisted` - not a refresh token, or already consumed,
    ///   revoked or expired
    /// * `StoreUnavailable` / `SigningFailure` from the re-issue
    pub async fn rotate(&self, refresh_token: &str) -> TokenResult<TokenPair> {
        let claims = self.decode_refresh(refresh_token)?;

        if !self.store.consume(claims.jti).await? {
            tracing::info!(
                user_id = %claims.user_id(),
                jti = %claims.jti,
                "refresh token is not whitelisted"
            );
            return Err(TokenError::RefreshNotWhitelisted);
        }

        let pair = self.issue_pair(claims.user_id()).await.map_err(|e| {
            tracing::warn!(
                user_id = %claims.user_id(),
                jti = %claims.jti,
                error = %e,
                "refresh token consumed but re-issue failed"
            );
            e
        })?;

        tracing::info!(user_id = %claims.user_id(), jti = %claims.jti, "rotated refresh token");
        Ok(pair)
    }

    /// Removes a refresh token from the whitelist
    ///
    /// Revoking a token that is already dead succeeds; a token that fails to
    /// decode reports the decode failure.
    pub async fn revoke(&self, refresh_token: &str) -> TokenResult<()> {
        let claims = self.decode_refresh(refresh_token)?;
        self.store.remove(claims.jti).await?;

        tracing::info!(user_id = %claims.user_id(), jti = %claims.jti, "revoked refresh token");
        Ok(())
    }

    /// Verifies an access token by signature and expiry alone
    ///
    /// Access tokens are never looked up in the whitelist.
    pub fn verify_access(&self, access_token: &str) -> TokenResult<TokenClaims> {
        let claims = self.codec.decode(access_token)?;
        if !claims.is_kind(TokenKind::Access) {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }

    fn decode_refresh(&self, refresh_token: &str) -> TokenResult<TokenClaims> {
        let claims = self.codec.decode(refresh_token)?;
        // Access identifiers are never registered
        if !claims.is_kind(TokenKind::Refresh) {
            return Err(TokenError::RefreshNotWhitelisted);
        }
        Ok(claims)
    }

    fn whitelist_ttl(&self) -> StdDuration {
        self.codec
            .ttl(TokenKind::Refresh)
            .to_std()
            .unwrap_or(StdDuration::ZERO)
    }
}
