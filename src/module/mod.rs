//! Module model consumed by the cache policy as opaque request keys

pub mod types;

pub use types::{ArtifactIdentifier, ModuleIdentifier, ModuleVersionIdentifier, ResolvedModuleVersion};
