//! # lab-api
//!
//! HTTP layer for Lab Site RS: axum handlers, routes, the uniform
//! response envelope, and the mapping from domain errors to HTTP
//! statuses.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
