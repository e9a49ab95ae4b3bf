//! Translation of `jsonwebtoken` failures into [`TokenError`] kinds.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

use super::types::TokenError;

/// Maps a verification failure to the decode taxonomy.
///
/// Anything not recognized as a parse, signature or expiry failure is
/// reported as [`TokenError::Invalid`].
pub fn translate_decode_error(err: &JwtError) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed,
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

/// Any failure while signing is a [`TokenError::SigningFailure`].
pub fn translate_encode_error(err: &JwtError) -> TokenError {
    tracing::error!(error = %err, "failed to sign token");
    TokenError::SigningFailure
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(kind: ErrorKind) -> TokenError {
        translate_decode_error(&JwtError::from(kind))
    }

    #[test]
    fn test_structural_failures_are_malformed() {
        assert_eq!(translate(ErrorKind::InvalidToken), TokenError::Malformed);
    }

    #[test]
    fn test_signature_and_expiry_are_distinguished() {
        assert_eq!(translate(ErrorKind::InvalidSignature), TokenError::SignatureInvalid);
        assert_eq!(translate(ErrorKind::ExpiredSignature), TokenError::Expired);
    }

    #[test]
    fn test_other_validation_failures_are_invalid() {
        assert_eq!(translate(ErrorKind::InvalidAlgorithm), TokenError::Invalid);
        assert_eq!(translate(ErrorKind::InvalidIssuer), TokenError::Invalid);
        assert_eq!(translate(ErrorKind::ImmatureSignature), TokenError::Invalid);
        assert_eq!(
            translate(ErrorKind::MissingRequiredClaim("exp".to_string())),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_encode_failures_are_signing_failures() {
        let err = JwtError::from(ErrorKind::InvalidKeyFormat);
        assert_eq!(translate_encode_error(&err), TokenError::SigningFailure);
    }
}
