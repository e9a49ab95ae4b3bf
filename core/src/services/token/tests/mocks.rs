//! Test doubles for the token manager

use async_trait::async_trait;
use chrono::Duration;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use uuid::Uuid;

use crate::domain::entities::{TokenClaims, TokenKind, UserClaims};
use crate::errors::{TokenError, TokenResult};
use crate::repositories::{MemoryWhitelist, WhitelistStore};
use crate::services::token::{ClaimsCodec, JwtCodec, TokenServiceConfig};

pub const TEST_SECRET: &str = "test-secret-for-token-manager";

pub fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::with_secret(TEST_SECRET)
}

pub fn test_codec() -> JwtCodec {
    JwtCodec::new(test_config()).unwrap()
}

/// Memory whitelist that records calls and can be switched into failure
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: MemoryWhitelist,
    pub registers: Arc<AtomicUsize>,
    pub consumes: Arc<AtomicUsize>,
    pub removes: Arc<AtomicUsize>,
    pub fail_register: Arc<AtomicBool>,
    pub fail_all: Arc<AtomicBool>,
    /// Overrides the TTL passed to `register`
    pub forced_ttl: Option<StdDuration>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every registration lands with a zero TTL, i.e. already expired
    pub fn expiring_immediately() -> Self {
        Self {
            forced_ttl: Some(StdDuration::ZERO),
            ..Self::default()
        }
    }

    pub fn register_count(&self) -> usize {
        self.registers.load(Ordering::SeqCst)
    }

    pub fn consume_count(&self) -> usize {
        self.consumes.load(Ordering::SeqCst)
    }

    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> TokenResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(TokenError::store_unavailable("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl WhitelistStore for RecordingStore {
    async fn register(&self, id: Uuid, ttl: StdDuration) -> TokenResult<()> {
        self.check_available()?;
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(TokenError::store_unavailable("write timed out"));
        }
        self.registers.fetch_add(1, Ordering::SeqCst);
        self.inner.register(id, self.forced_ttl.unwrap_or(ttl)).await
    }

    async fn exists(&self, id: Uuid) -> TokenResult<bool> {
        self.check_available()?;
        self.inner.exists(id).await
    }

    async fn remove(&self, id: Uuid) -> TokenResult<()> {
        self.check_available()?;
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(id).await
    }

    async fn consume(&self, id: Uuid) -> TokenResult<bool> {
        self.check_available()?;
        self.consumes.fetch_add(1, Ordering::SeqCst);
        self.inner.consume(id).await
    }
}

/// Wraps a real codec and can be told to fail signing
pub struct SwitchableCodec {
    pub inner: JwtCodec,
    pub fail_encode: Arc<AtomicBool>,
}

impl SwitchableCodec {
    pub fn new(inner: JwtCodec) -> Self {
        Self {
            inner,
            fail_encode: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl ClaimsCodec for SwitchableCodec {
    fn encode(&self, user: &UserClaims, kind: TokenKind, jti: Uuid) -> TokenResult<String> {
        if self.fail_encode.load(Ordering::SeqCst) {
            return Err(TokenError::SigningFailure);
        }
        self.inner.encode(user, kind, jti)
    }

    fn decode(&self, token: &str) -> TokenResult<TokenClaims> {
        self.inner.decode(token)
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        self.inner.ttl(kind)
    }
}
