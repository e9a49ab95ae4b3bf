//! Token error taxonomy
//!
//! Every failure of the token subsystem is reported as one of these kinds.
//! Callers match on the variant, never on the message.

use snip_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Token lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token string cannot be parsed as a signed token
    #[error("token malformed")]
    Malformed,

    /// Structurally valid, but the signature does not verify
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// Valid signature, past its expiry
    #[error("token expired")]
    Expired,

    /// Any other validation failure (algorithm, issuer, missing claim)
    #[error("token invalid")]
    Invalid,

    /// Valid token that is not an active refresh credential.
    ///
    /// Consumed, revoked and store-expired tokens all land here so callers
    /// cannot tell them apart.
    #[error("refresh token is not in whitelist")]
    RefreshNotWhitelisted,

    /// The whitelist store could not be reached
    #[error("token store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// A token could not be signed at issuance time
    #[error("token signing failed")]
    SigningFailure,
}

pub type TokenResult<T> = Result<T, TokenError>;

impl TokenError {
    /// Stable code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "TOKEN_MALFORMED",
            TokenError::SignatureInvalid => "TOKEN_SIGNATURE_INVALID",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Invalid => "TOKEN_INVALID",
            TokenError::RefreshNotWhitelisted => "REFRESH_NOT_WHITELISTED",
            TokenError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            TokenError::SigningFailure => "SIGNING_FAILURE",
        }
    }

    /// Whether the failure came from decoding the presented token
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed
                | TokenError::SignatureInvalid
                | TokenError::Expired
                | TokenError::Invalid
        )
    }

    /// Only store outages are transient; everything else is a deterministic
    /// outcome of the input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TokenError::StoreUnavailable { .. })
    }

    /// Internal failures must not leak details to clients
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TokenError::StoreUnavailable { .. } | TokenError::SigningFailure
        )
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        TokenError::StoreUnavailable {
            message: message.into(),
        }
    }
}

/// Convert TokenError to ErrorResponse
impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        let message = if err.is_internal() {
            "internal server error".to_string()
        } else {
            err.to_string()
        };
        ErrorResponse::new(err.code(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failures() {
        assert!(TokenError::Malformed.is_decode_failure());
        assert!(TokenError::SignatureInvalid.is_decode_failure());
        assert!(TokenError::Expired.is_decode_failure());
        assert!(TokenError::Invalid.is_decode_failure());
        assert!(!TokenError::RefreshNotWhitelisted.is_decode_failure());
        assert!(!TokenError::SigningFailure.is_decode_failure());
    }

    #[test]
    fn test_only_store_failures_are_retryable() {
        assert!(TokenError::store_unavailable("connection refused").is_retryable());
        assert!(!TokenError::Expired.is_retryable());
        assert!(!TokenError::RefreshNotWhitelisted.is_retryable());
        assert!(!TokenError::SigningFailure.is_retryable());
    }

    #[test]
    fn test_error_response_conversion() {
        let response: ErrorResponse = (&TokenError::Expired).into();
        assert_eq!(response.error, "TOKEN_EXPIRED");
        assert_eq!(response.message, "token expired");
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = TokenError::store_unavailable("redis://secret-host refused");
        let response: ErrorResponse = (&err).into();
        assert_eq!(response.error, "STORE_UNAVAILABLE");
        assert!(!response.message.contains("secret-host"));
    }
}
