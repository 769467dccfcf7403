//! Hatchet API client.
//!
//! Provides a read-only HTTP client for the Hatchet REST API and the
//! [`HatchetApi`] trait the MCP tools are written against.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
mod wire;

pub use api::{HatchetApi, RunResult};
pub use config::{ClientConfig, TokenClaims};
pub use error::ClientError;
pub use http::HatchetClient;
