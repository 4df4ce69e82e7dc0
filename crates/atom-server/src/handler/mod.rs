//! All `aide::axum::`[`ApiRouter`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use atom_server::handler::routes;
//! use atom_server::service::{Collaborators, ServiceConfig, ServiceState};
//! use axum::Router;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config, Collaborators::new())?;
//!
//! let app: Router = routes().with_state::<()>(state).into();
//! # Ok(())
//! # }
//! ```
//!
//! [`ApiRouter`]: aide::axum::ApiRouter
//! [`Handler`]: axum::handler::Handler

mod boot;
mod error;
mod health;
mod memory;
mod news;
mod speech;
mod weather;

pub mod request;
pub mod response;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound
        .with_message("Route not found")
        .into_response()
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(boot::routes())
        .merge(health::routes())
        .merge(weather::routes())
        .merge(news::routes())
        .merge(speech::routes())
        .merge(memory::routes())
        .fallback(handler)
}
