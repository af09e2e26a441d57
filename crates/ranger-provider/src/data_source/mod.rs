// Read-only data sources

pub mod service;

pub use service::ServiceDataSource;
