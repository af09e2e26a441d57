// Managed resources

pub mod policy;

pub use policy::{PolicyResource, Refreshed};
