//! Business services containing domain logic and use cases.

pub mod token;

// Re-export commonly used types
pub use token::{ClaimsCodec, JwtCodec, TokenManager, TokenServiceConfig};
