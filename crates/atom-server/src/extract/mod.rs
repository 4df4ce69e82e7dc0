//! Request extractors with structured rejections.
//!
//! - [`Json`] deserializes a body and maps every rejection to a `400`
//!   [`ErrorResponse`] with a readable message.
//! - [`ValidateJson`] additionally runs `validator` rules on the body.
//!
//! [`ErrorResponse`]: crate::handler::response::ErrorResponse

pub mod reject;

pub use crate::extract::reject::{Json, ValidateJson};
