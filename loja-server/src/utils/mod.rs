//! Utility Modules

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse, ok_message, ok_with_message};
pub use result::AppResult;
