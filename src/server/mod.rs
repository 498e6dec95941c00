//! Server module: assembles services, configuration and routes into an
//! HTTP application
//!
//! - `ServerBuilder` collects storage services and configuration
//! - `ServerHost` holds the assembled, transport-agnostic state
//! - `exposure::RestExposure` turns a host into an Axum router

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::ServerHost;
