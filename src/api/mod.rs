//! # Backend API
//!
//! Wire types and the async client for the preferences and recommendation
//! services. The core only builds and consumes the wire types; the client
//! is driven by adapters outside `update()`.

pub mod backend;
pub mod client;
pub mod types;

pub use backend::{ApiError, Backend};
pub use client::HttpBackend;
