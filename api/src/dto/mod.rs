pub mod auth;

pub use auth::{HealthResponse, MeResponse};
