//! Response types for HTTP handlers.

mod boot;
mod errors;
mod memory;
mod news;
mod speech;

pub use boot::*;
pub use errors::*;
pub use memory::*;
pub use news::*;
pub use speech::*;

pub use crate::service::HealthReport;
