pub mod error_handler;

pub use error_handler::{handle_token_error, missing_token_response, token_error_status};
