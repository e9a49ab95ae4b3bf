use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use snip_core::repositories::WhitelistStore;

use crate::cookies::{read_cookie, set_token_cookies, REFRESH_TOKEN_COOKIE};
use crate::handlers::error_handler::{handle_token_error, missing_token_response};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges the `refresh-token` cookie for a new token pair. The presented
/// refresh token is single-use: a second call with it fails.
///
/// # Response
///
/// ## Success (204 No Content)
/// Both `access-token` and `refresh-token` cookies are replaced.
///
/// ## Errors
/// - 401 Unauthorized: refresh token malformed, expired or badly signed
/// - 422 Unprocessable Entity: cookie missing, or token already used/revoked
/// - 503 Service Unavailable: whitelist store unreachable
/// - 500 Internal Server Error: token signing failure
pub async fn refresh<S>(req: HttpRequest, state: web::Data<AppState<S>>) -> HttpResponse
where
    S: WhitelistStore + 'static,
{
    let Some(refresh_token) = read_cookie(&req, REFRESH_TOKEN_COOKIE) else {
        return missing_token_response(StatusCode::UNPROCESSABLE_ENTITY, REFRESH_TOKEN_COOKIE);
    };

    match state.tokens.rotate(&refresh_token).await {
        Ok(pair) => {
            let mut response = HttpResponse::NoContent();
            set_token_cookies(&mut response, &pair, &state.cookies);
            response.finish()
        }
        Err(error) => handle_token_error(&error),
    }
}
