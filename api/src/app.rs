//! Application factory
//!
//! Builds the Actix-web application around a shared `AppState`.

use actix_web::{web, App, HttpResponse};
use snip_core::repositories::WhitelistStore;
use snip_shared::config::Environment;
use tracing_actix_web::TracingLogger;

use crate::dto::HealthResponse;
use crate::middleware::{auth::AccessAuth, cors::create_cors};
use crate::routes::auth::{logout::logout, me::me, refresh::refresh, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
    environment: Environment,
    cors_max_age: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: WhitelistStore + 'static,
{
    let access_auth = AccessAuth::new(app_state.tokens.clone());

    App::new()
        .app_data(app_state)
        .wrap(create_cors(environment, cors_max_age))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/refresh", web::post().to(refresh::<S>))
                    .route("/logout", web::post().to(logout::<S>))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(me))
                            .wrap(access_auth),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy())
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(snip_shared::types::ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
