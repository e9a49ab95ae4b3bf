//! CORS middleware configuration for cross-origin requests.
//!
//! Token cookies require credentialed requests, so both profiles support
//! credentials. Development mirrors any origin; production only accepts the
//! origins listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use snip_shared::config::Environment;
use std::env;

/// Creates a CORS middleware instance configured for `environment`.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
pub fn create_cors(environment: Environment, max_age: usize) -> Cors {
    if environment.is_production() {
        create_production_cors(max_age, env::var("ALLOWED_ORIGINS").ok().as_deref())
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::info!("Configuring CORS for development environment");

    Cors::default()
        // Credentialed requests cannot use a wildcard origin, so echo it back
        .allowed_origin_fn(|_, _| true)
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
        .supports_credentials()
}

fn create_production_cors(max_age: usize, allowed_origins: Option<&str>) -> Cors {
    tracing::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
        .supports_credentials();

    for origin in allowed_origins
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
    {
        tracing::info!(origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
