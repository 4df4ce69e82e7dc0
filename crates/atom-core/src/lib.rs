#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod health;
mod status;

pub mod embedding;
pub mod engine;
pub mod memory;
pub mod news;
pub mod robotics;
pub mod speech;
pub mod weather;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::health::{ServiceHealth, ServiceStatus};
pub use crate::status::{
    LinkStatus, ProbeStatus, RunStatus, StoreStatus, SynthesisMode, SynthesisStatus,
};
