use actix_web::HttpResponse;

use crate::dto::MeResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires a valid access token (cookie or Bearer header).
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: auth.user_id,
    })
}
