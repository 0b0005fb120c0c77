//! Cache freshness decisions for dependency resolution
//!
//! Given a cached answer and its age, decide whether the answer may be used
//! or must be revalidated against the origin.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐ query  ┌─────────────────────┐
//! │    Resolution    │───────▶│ DefaultCachePolicy  │
//! │    pipeline      │◀───────│ (CachePolicy trait) │
//! └──────────────────┘  bool  └─────────────────────┘
//!                                 │ builds  │ runs
//!                                 ▼         ▼
//!                    ┌───────────────┐   ┌───────────┐
//!                    │ Resolution    │◀──│ RuleChain │
//!                    │ Control       │   │ (per      │
//!                    │ (per lookup)  │   │  domain)  │
//!                    └───────────────┘   └───────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache_policy`]: the policy engine, its default rules and the query trait
//! - [`control`]: per-lookup decision record and the three lookup domains
//! - [`rule`]: front-inserting rule chains with first-match evaluation
//! - [`time_unit`]: cache window units and age computation
//! - [`error`]: error types for identifiers, units and configuration

pub mod cache_policy;
pub mod control;
pub mod error;
pub mod rule;
pub mod time_unit;

pub use cache_policy::{CachePolicy, DefaultCachePolicy};
pub use control::{
    ArtifactFlags, ArtifactResolutionControl, Artifacts, Decision, Dependencies,
    DependencyResolutionControl, ModuleFlags, ModuleResolutionControl, Modules, ResolutionControl,
    ResolutionDomain,
};
pub use rule::{Rule, RuleChain};
pub use time_unit::{TimeUnit, age_millis};
