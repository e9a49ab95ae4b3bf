//! Domain-specific error types and error handling.

mod translation;
mod types;

pub use translation::{translate_decode_error, translate_encode_error};
pub use types::{TokenError, TokenResult};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn reject() -> DomainResult<()> {
        let signed: TokenResult<()> = Err(TokenError::SigningFailure);
        signed?;
        Ok(())
    }

    #[test]
    fn test_token_errors_bridge_into_domain_errors() {
        let err = reject().unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::SigningFailure)));
        assert_eq!(err.to_string(), "token signing failed");
    }

    #[test]
    fn test_validation_error_message() {
        let err = DomainError::Validation {
            message: "JWT secret must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Validation error: JWT secret must not be empty");
    }
}
