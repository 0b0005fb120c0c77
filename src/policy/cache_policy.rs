//! Cache freshness policy for version lists, modules and artifacts

use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;

use crate::config::CachePolicyConfig;
use crate::module::{ArtifactIdentifier, ModuleIdentifier, ModuleVersionIdentifier, ResolvedModuleVersion};
use crate::policy::control::{
    ArtifactFlags, ArtifactResolutionControl, Artifacts, Dependencies, DependencyResolutionControl,
    ModuleFlags, ModuleResolutionControl, Modules,
};
use crate::policy::rule::RuleChain;
use crate::policy::time_unit::TimeUnit;

/// Decisions the resolution pipeline asks for before trusting a cache entry.
///
/// Every method answers "must the cached entry be revalidated against the
/// origin?". `age_millis` is computed by the caller and never re-measured.
pub trait CachePolicy: Send + Sync {
    /// Should the versions matching a dynamic version of `module` be listed again?
    fn must_refresh_version_list(
        &self,
        module: &ModuleIdentifier,
        matching_versions: &IndexSet<ModuleVersionIdentifier>,
        age_millis: i64,
    ) -> bool;

    /// Should metadata for a non-changing module be resolved again?
    /// `resolved` is `None` when the cache recorded a miss.
    fn must_refresh_module(
        &self,
        module_version: &ModuleVersionIdentifier,
        resolved: Option<&ResolvedModuleVersion>,
        age_millis: i64,
    ) -> bool;

    /// Same as [`must_refresh_module`](Self::must_refresh_module) for a changing module
    fn must_refresh_changing_module(
        &self,
        module_version: &ModuleVersionIdentifier,
        resolved: Option<&ResolvedModuleVersion>,
        age_millis: i64,
    ) -> bool;

    /// Should the artifact set of a module version be resolved again?
    fn must_refresh_module_artifacts(
        &self,
        module_version: &ModuleVersionIdentifier,
        artifacts: &IndexSet<ArtifactIdentifier>,
        age_millis: i64,
        belongs_to_changing_module: bool,
        module_descriptor_in_sync: bool,
    ) -> bool;

    /// Should a single artifact be downloaded again?
    /// `cached_file` is `None` when the cache recorded a miss.
    fn must_refresh_artifact(
        &self,
        artifact: &ArtifactIdentifier,
        cached_file: Option<&Path>,
        age_millis: i64,
        belongs_to_changing_module: bool,
        module_descriptor_in_sync: bool,
    ) -> bool;
}

/// Rule-based [`CachePolicy`].
///
/// Holds one [`RuleChain`] per domain. Construction installs the default
/// rules, in order: dynamic versions, changing modules, missing modules and
/// artifacts. Every registration goes to the front of its chain, so rules
/// registered later (including every user rule) are consulted first.
///
/// Registration needs `&mut self` while queries only need `&self`; to resolve
/// against a stable rule set while the original keeps accepting rules, take a
/// [`copy`](Self::copy) and share that instead.
#[derive(Debug, Clone)]
pub struct DefaultCachePolicy {
    dependency_rules: RuleChain<Dependencies>,
    module_rules: RuleChain<Modules>,
    artifact_rules: RuleChain<Artifacts>,
}

impl DefaultCachePolicy {
    /// A policy trusting dynamic versions, changing modules and cached misses for 24 hours
    pub fn new() -> Self {
        Self::from_config(&CachePolicyConfig::default())
    }

    pub fn from_config(config: &CachePolicyConfig) -> Self {
        let mut policy = Self {
            dependency_rules: RuleChain::new(),
            module_rules: RuleChain::new(),
            artifact_rules: RuleChain::new(),
        };

        let window = config.dynamic_versions;
        policy.cache_dynamic_versions_for(window.value, window.unit);
        let window = config.changing_modules;
        policy.cache_changing_modules_for(window.value, window.unit);
        let window = config.missing_modules_and_artifacts;
        policy.cache_missing_modules_and_artifacts_for(window.value, window.unit);

        debug!(
            "Cache policy installed defaults: dynamic versions {:?}, changing modules {:?}, missing {:?}",
            config.dynamic_versions, config.changing_modules, config.missing_modules_and_artifacts
        );
        policy
    }

    pub fn each_dependency<F>(&mut self, rule: F)
    where
        F: Fn(&mut DependencyResolutionControl<'_>) + Send + Sync + 'static,
    {
        self.dependency_rules.push_front(rule);
    }

    pub fn each_module<F>(&mut self, rule: F)
    where
        F: Fn(&mut ModuleResolutionControl<'_>) + Send + Sync + 'static,
    {
        self.module_rules.push_front(rule);
    }

    pub fn each_artifact<F>(&mut self, rule: F)
    where
        F: Fn(&mut ArtifactResolutionControl<'_>) + Send + Sync + 'static,
    {
        self.artifact_rules.push_front(rule);
    }

    /// Trust dynamic version listings for `value` `unit`s
    pub fn cache_dynamic_versions_for(&mut self, value: i64, unit: TimeUnit) {
        self.each_dependency(move |control| control.cache_for(value, unit));
    }

    /// Trust changing modules, and artifacts of changing modules, for `value` `unit`s
    pub fn cache_changing_modules_for(&mut self, value: i64, unit: TimeUnit) {
        self.each_module(move |control| {
            if control.is_changing() {
                control.cache_for(value, unit);
            }
        });
        self.each_artifact(move |control| {
            if control.belongs_to_changing_module() {
                control.cache_for(value, unit);
            }
        });
    }

    pub(crate) fn cache_missing_modules_and_artifacts_for(&mut self, value: i64, unit: TimeUnit) {
        self.each_module(move |control| {
            if control.cached_result().is_none() {
                control.cache_for(value, unit);
            }
        });
        self.each_artifact(move |control| {
            if control.cached_result().is_none() {
                control.cache_for(value, unit);
            }
        });
    }

    /// Snapshot the current rules.
    ///
    /// The copy shares rule objects with `self` but owns its chains, so later
    /// registrations on either side are not seen by the other.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn dependency_rules(&self) -> &RuleChain<Dependencies> {
        &self.dependency_rules
    }

    pub fn module_rules(&self) -> &RuleChain<Modules> {
        &self.module_rules
    }

    pub fn artifact_rules(&self) -> &RuleChain<Artifacts> {
        &self.artifact_rules
    }

    fn evaluate_module(
        &self,
        module_version: &ModuleVersionIdentifier,
        resolved: Option<&ResolvedModuleVersion>,
        age_millis: i64,
        changing: bool,
    ) -> bool {
        let mut control =
            ModuleResolutionControl::new(module_version, resolved, age_millis, ModuleFlags { changing });
        self.module_rules.evaluate(&mut control)
    }
}

impl Default for DefaultCachePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CachePolicy for DefaultCachePolicy {
    fn must_refresh_version_list(
        &self,
        module: &ModuleIdentifier,
        matching_versions: &IndexSet<ModuleVersionIdentifier>,
        age_millis: i64,
    ) -> bool {
        let mut control =
            DependencyResolutionControl::new(module, Some(matching_versions), age_millis, ());
        self.dependency_rules.evaluate(&mut control)
    }

    fn must_refresh_module(
        &self,
        module_version: &ModuleVersionIdentifier,
        resolved: Option<&ResolvedModuleVersion>,
        age_millis: i64,
    ) -> bool {
        self.evaluate_module(module_version, resolved, age_millis, false)
    }

    fn must_refresh_changing_module(
        &self,
        module_version: &ModuleVersionIdentifier,
        resolved: Option<&ResolvedModuleVersion>,
        age_millis: i64,
    ) -> bool {
        self.evaluate_module(module_version, resolved, age_millis, true)
    }

    fn must_refresh_module_artifacts(
        &self,
        module_version: &ModuleVersionIdentifier,
        artifacts: &IndexSet<ArtifactIdentifier>,
        age_millis: i64,
        belongs_to_changing_module: bool,
        module_descriptor_in_sync: bool,
    ) -> bool {
        if belongs_to_changing_module && !module_descriptor_in_sync {
            debug!(
                "Descriptor of changing module {} is out of sync, refreshing {} artifacts",
                module_version,
                artifacts.len()
            );
            return true;
        }

        // The artifact set hangs off a module that did resolve, so the
        // module chain sees a present cached result.
        let resolved = ResolvedModuleVersion::new(module_version.clone());
        self.evaluate_module(
            module_version,
            Some(&resolved),
            age_millis,
            belongs_to_changing_module,
        )
    }

    fn must_refresh_artifact(
        &self,
        artifact: &ArtifactIdentifier,
        cached_file: Option<&Path>,
        age_millis: i64,
        belongs_to_changing_module: bool,
        module_descriptor_in_sync: bool,
    ) -> bool {
        if belongs_to_changing_module && !module_descriptor_in_sync {
            debug!(
                "Descriptor of changing module {} is out of sync, refreshing {}",
                artifact.module_version, artifact
            );
            return true;
        }

        let mut control = ArtifactResolutionControl::new(
            artifact,
            cached_file,
            age_millis,
            ArtifactFlags {
                belongs_to_changing_module,
            },
        );
        self.artifact_rules.evaluate(&mut control)
    }
}
