//! Common type definitions shared by the API and core layers.

pub mod response;

pub use response::ErrorResponse;
