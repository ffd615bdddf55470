//! PhilU extensions plugin for the platform deployment orchestrator
//!
//! A declarative plugin: it registers configuration defaults, Docker image
//! manifests, template directories, environment-file patches, and
//! initialization task scripts into the orchestrator's filter registry.
//! Everything that happens with those entries afterwards (rendering,
//! building, scheduling) belongs to the orchestrator.

pub mod error;
pub mod filters;
pub mod plugin;
pub mod resources;

pub use error::{ExtensionError, Result};
pub use filters::{Filter, FilterRegistry};
pub use resources::ResourceRoot;
