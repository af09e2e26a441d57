//! Ranger Client - Rust SDK for the Apache Ranger admin REST API
//!
//! This crate provides:
//! - Wire model types for policies and services
//! - HTTP transport with basic authentication
//! - The `PolicyApi` trait and its HTTP-backed implementation

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod model;

pub use api::{PolicyApi, RangerClient};
pub use config::RangerClientConfig;
pub use error::{RangerError, Result};
pub use http::RangerHttpClient;
pub use model::{Access, Policy, PolicyItem, PolicyResource, Service};
