//! # Snip Core
//!
//! Token lifecycle domain for the Snip backend: a signed claims codec, the
//! refresh token whitelist abstraction, and the manager that issues, rotates
//! and revokes access/refresh token pairs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
