//! HTTP layer: client configuration, error type, and the fallback-aware
//! API client for the timesheet service.

pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
