use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use snip_core::repositories::WhitelistStore;

use crate::cookies::{clear_token_cookies, read_cookie, REFRESH_TOKEN_COOKIE};
use crate::handlers::error_handler::{handle_token_error, missing_token_response};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the refresh token from the `refresh-token` cookie and expires both
/// token cookies. The access token stays valid until its own expiry.
///
/// # Response
///
/// ## Success (204 No Content)
///
/// ## Errors
/// - 401 Unauthorized: refresh token malformed, expired or badly signed
/// - 422 Unprocessable Entity: cookie missing, or not a refresh token
/// - 503 Service Unavailable: whitelist store unreachable
pub async fn logout<S>(req: HttpRequest, state: web::Data<AppState<S>>) -> HttpResponse
where
    S: WhitelistStore + 'static,
{
    let Some(refresh_token) = read_cookie(&req, REFRESH_TOKEN_COOKIE) else {
        return missing_token_response(StatusCode::UNPROCESSABLE_ENTITY, REFRESH_TOKEN_COOKIE);
    };

    match state.tokens.revoke(&refresh_token).await {
        Ok(()) => {
            let mut response = HttpResponse::NoContent();
            clear_token_cookies(&mut response, &state.cookies);
            response.finish()
        }
        Err(error) => handle_token_error(&error),
    }
}
