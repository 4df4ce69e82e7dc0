//! JSON extractors that reject with [`Error`] instead of plain text.
//!
//! [`Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::validated_json::ValidateJson;
