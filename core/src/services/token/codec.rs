//! Claims codec: signs claims into self-contained tokens and verifies them.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{TokenClaims, TokenKind, UserClaims};
use crate::errors::{
    translate_decode_error, translate_encode_error, DomainError, DomainResult, TokenError,
    TokenResult,
};

use super::config::TokenServiceConfig;

/// Capability to turn claims into signed tokens and back
///
/// Implementations hold no mutable state and never touch the whitelist.
pub trait ClaimsCodec: Send + Sync {
    /// Signs a token of `kind` for `user` carrying the identifier `jti`
    ///
    /// Expiry is `now + ttl(kind)`. Fails only with
    /// [`TokenError::SigningFailure`], including when that expiry overflows.
    fn encode(&self, user: &UserClaims, kind: TokenKind, jti: Uuid) -> TokenResult<String>;

    /// Verifies signature, issuer and expiry, returning the embedded claims
    ///
    /// Fails with one of `Malformed`, `SignatureInvalid`, `Expired` or
    /// `Invalid`.
    fn decode(&self, token: &str) -> TokenResult<TokenClaims>;

    /// Configured lifetime for tokens of `kind`
    fn ttl(&self, kind: TokenKind) -> Duration;
}

/// Payload as read off the wire
///
/// Every field is optional so a missing claim surfaces as
/// [`TokenError::Invalid`] instead of a parse failure.
#[derive(Debug, Deserialize)]
struct WireClaims {
    uid: Option<Uuid>,
    #[serde(rename = "type")]
    kind: Option<TokenKind>,
    jti: Option<Uuid>,
    iss: Option<String>,
    exp: Option<i64>,
}

impl TryFrom<WireClaims> for TokenClaims {
    type Error = TokenError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        match (wire.uid, wire.kind, wire.jti, wire.iss, wire.exp) {
            (Some(uid), Some(kind), Some(jti), Some(iss), Some(exp)) => Ok(TokenClaims {
                user: UserClaims::new(uid),
                kind,
                jti,
                iss,
                exp,
            }),
            _ => Err(TokenError::Invalid),
        }
    }
}

/// HMAC-signed JWT codec
pub struct JwtCodec {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    /// Creates a codec bound to the secret and algorithm in `config`
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT secret must not be empty".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &self.config.algorithm)
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl ClaimsCodec for JwtCodec {
    fn encode(&self, user: &UserClaims, kind: TokenKind, jti: Uuid) -> TokenResult<String> {
        let expires_at = Utc::now().checked_add_signed(self.ttl(kind)).ok_or_else(|| {
            tracing::error!(%kind, "token expiry is out of the representable range");
            TokenError::SigningFailure
        })?;

        let claims = TokenClaims {
            user: *user,
            kind,
            jti,
            iss: self.config.issuer.clone(),
            exp: expires_at.timestamp(),
        };

        let header = Header::new(self.config.algorithm);
        encode(&header, &claims, &self.encoding_key).map_err(|e| translate_encode_error(&e))
    }

    fn decode(&self, token: &str) -> TokenResult<TokenClaims> {
        let data = decode::<WireClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| translate_decode_error(&e))?;
        TokenClaims::try_from(data.claims)
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_token_expiry,
            TokenKind::Refresh => self.config.refresh_token_expiry,
        }
    }
}
