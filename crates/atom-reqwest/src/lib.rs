#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod connect;
mod error;
mod service;

pub use crate::config::UpstreamConfig;
pub use crate::connect::{ReqwestClient, ReqwestConfig, TRACING_TARGET};
pub use crate::error::{Error, Result};
pub use crate::service::{ChromaClient, EmbeddingServerClient, NewsApiClient, OpenMeteoClient};
