//! Ranger Provider - declarative management of Apache Ranger policies
//!
//! This crate provides:
//! - The tri-state attribute value and configuration model
//! - Presence-preserving conversion to and from the Ranger wire model
//! - Schema declarations with defaults, validation and plan modifiers
//! - Provider configuration with `RANGER_*` environment fallback
//! - The `ranger_policy` resource and `ranger_service` data source
//! - The host pipeline driving each operation from JSON documents
//!
//! # Example
//!
//! ```ignore
//! use ranger_provider::{ProviderConfig, RangerProvider};
//!
//! let provider = RangerProvider::new(env!("CARGO_PKG_VERSION"));
//! let configured = provider.configure(&ProviderConfig::default())?;
//! let lookup = configured.service_data_source().read("dev_kafka").await?;
//! ```

pub mod config;
pub mod data_source;
pub mod diagnostics;
pub mod host;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod value;

pub use crate::config::ProviderConfig;
pub use data_source::ServiceDataSource;
pub use diagnostics::{DiagResult, Diagnostic, Diagnostics, Severity};
pub use model::{
    AccessGrant, PolicyConfig, PolicyRule, ResourceFilter, ResourceFilterSet, ResourceKind,
    ServiceLookup,
};
pub use provider::{ConfiguredProvider, RangerProvider};
pub use resource::PolicyResource;
pub use value::AttrValue;
