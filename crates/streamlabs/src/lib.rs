pub mod api;
pub mod auth;
pub mod error;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use types::*;
