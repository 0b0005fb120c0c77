//! Cache policy for a dependency resolver.
//!
//! Decides whether a cached version listing, module resolution or artifact
//! file can be used, or must be checked against its origin again. Consumers
//! register override rules on a [`DefaultCachePolicy`]; built-in time windows
//! apply when no rule decides.
//!
//! ```
//! use resolve_cache_policy::{CachePolicy, DefaultCachePolicy, ModuleVersionIdentifier};
//!
//! let mut policy = DefaultCachePolicy::new();
//! policy.each_module(|control| {
//!     if control.request().group == "com.acme" {
//!         control.refresh();
//!     }
//! });
//!
//! let id: ModuleVersionIdentifier = "com.acme:core:1.0".parse().unwrap();
//! assert!(policy.must_refresh_module(&id, None, 0));
//! ```

pub mod config;
pub mod module;
pub mod policy;

pub use config::CachePolicyConfig;
pub use module::{ArtifactIdentifier, ModuleIdentifier, ModuleVersionIdentifier, ResolvedModuleVersion};
pub use policy::{CachePolicy, DefaultCachePolicy, TimeUnit};
