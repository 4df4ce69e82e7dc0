//! Reqwest client module.
//!
//! This module provides the shared HTTP client used by every upstream
//! implementation in this crate.

mod client;
mod config;

pub use client::{ReqwestClient, TRACING_TARGET};
pub use config::ReqwestConfig;
