//! Request types for HTTP handlers.

mod boot;
mod speech;
mod weather;

pub use boot::*;
pub use speech::*;
pub use weather::*;
