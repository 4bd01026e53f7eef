//! Utility modules: errors, logging, validation, time, OTP policy

pub mod error;
pub mod logger;
pub mod otp;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, ErrorBody};
pub use result::AppResult;
