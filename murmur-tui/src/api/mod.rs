mod client;
mod error;

pub use client::{ApiClient, Gateway};
pub use error::{ApiError, ApiResult};
