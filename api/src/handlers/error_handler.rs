//! Maps token errors onto HTTP responses.

use actix_web::{http::StatusCode, HttpResponse};
use snip_core::errors::TokenError;
use snip_shared::types::ErrorResponse;

/// Transport status for each error kind
///
/// - any decode failure: 401
/// - refresh token not whitelisted: 422
/// - store outage: 503
/// - signing failure: 500
pub fn token_error_status(error: &TokenError) -> StatusCode {
    match error {
        TokenError::Malformed
        | TokenError::SignatureInvalid
        | TokenError::Expired
        | TokenError::Invalid => StatusCode::UNAUTHORIZED,
        TokenError::RefreshNotWhitelisted => StatusCode::UNPROCESSABLE_ENTITY,
        TokenError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        TokenError::SigningFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the JSON error response for a token error
pub fn handle_token_error(error: &TokenError) -> HttpResponse {
    let status = token_error_status(error);
    if status.is_server_error() {
        tracing::error!(code = error.code(), error = %error, "token operation failed");
    } else {
        tracing::warn!(code = error.code(), "rejected credential");
    }

    HttpResponse::build(status).json(ErrorResponse::from(error))
}

/// Response for a request that carried no token at all
pub fn missing_token_response(status: StatusCode, cookie_name: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(
        "MISSING_TOKEN",
        format!("{} is required", cookie_name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failures_are_unauthorized() {
        for error in [
            TokenError::Malformed,
            TokenError::SignatureInvalid,
            TokenError::Expired,
            TokenError::Invalid,
        ] {
            assert_eq!(token_error_status(&error), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_lifecycle_failures() {
        assert_eq!(
            token_error_status(&TokenError::RefreshNotWhitelisted),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            token_error_status(&TokenError::store_unavailable("down")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            token_error_status(&TokenError::SigningFailure),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_handle_token_error_sets_status() {
        let response = handle_token_error(&TokenError::Expired);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
