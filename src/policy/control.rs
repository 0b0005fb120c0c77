//! Per-lookup decision record passed through a rule chain
//!
//! A [`ResolutionControl`] is built for exactly one query, handed to each rule
//! of the matching chain in turn, and dropped once a verdict is read back.
//! Rules render a verdict through [`ResolutionControl::cache_for`],
//! [`ResolutionControl::use_cached_result`] or [`ResolutionControl::refresh`].

use std::fmt;
use std::path::Path;

use indexmap::IndexSet;
use tracing::trace;

use crate::module::{ArtifactIdentifier, ModuleIdentifier, ModuleVersionIdentifier, ResolvedModuleVersion};
use crate::policy::time_unit::TimeUnit;

/// One of the three lookup kinds a policy answers for
pub trait ResolutionDomain: fmt::Debug + 'static {
    /// What was looked up
    type Request: ?Sized + fmt::Debug + fmt::Display;
    /// What the cache holds for the request
    type CachedResult: ?Sized + fmt::Debug;
    /// Domain-specific facts computed by the caller
    type Flags: Copy + fmt::Debug;

    /// Human readable domain name, used in logs
    const NAME: &'static str;
}

/// Dynamic version lookups: module -> set of matching versions
#[derive(Debug)]
pub enum Dependencies {}

/// Module metadata lookups: module version -> resolved module
#[derive(Debug)]
pub enum Modules {}

/// Artifact lookups: artifact -> downloaded file
#[derive(Debug)]
pub enum Artifacts {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleFlags {
    /// The module version may be republished under the same coordinate
    pub changing: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactFlags {
    pub belongs_to_changing_module: bool,
}

impl ResolutionDomain for Dependencies {
    type Request = ModuleIdentifier;
    type CachedResult = IndexSet<ModuleVersionIdentifier>;
    type Flags = ();

    const NAME: &'static str = "dependency";
}

impl ResolutionDomain for Modules {
    type Request = ModuleVersionIdentifier;
    type CachedResult = ResolvedModuleVersion;
    type Flags = ModuleFlags;

    const NAME: &'static str = "module";
}

impl ResolutionDomain for Artifacts {
    type Request = ArtifactIdentifier;
    type CachedResult = Path;
    type Flags = ArtifactFlags;

    const NAME: &'static str = "artifact";
}

/// Verdict rendered by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The cached result can be trusted as-is
    UseCachedResult,
    /// The cached result must be revalidated against the origin
    MustCheck,
}

impl Decision {
    pub fn must_check(&self) -> bool {
        matches!(self, Decision::MustCheck)
    }
}

#[derive(Debug)]
pub struct ResolutionControl<'a, D: ResolutionDomain> {
    request: &'a D::Request,
    cached_result: Option<&'a D::CachedResult>,
    age_millis: i64,
    flags: D::Flags,
    decision: Option<Decision>,
}

pub type DependencyResolutionControl<'a> = ResolutionControl<'a, Dependencies>;
pub type ModuleResolutionControl<'a> = ResolutionControl<'a, Modules>;
pub type ArtifactResolutionControl<'a> = ResolutionControl<'a, Artifacts>;

impl<'a, D: ResolutionDomain> ResolutionControl<'a, D> {
    pub fn new(
        request: &'a D::Request,
        cached_result: Option<&'a D::CachedResult>,
        age_millis: i64,
        flags: D::Flags,
    ) -> Self {
        Self {
            request,
            cached_result,
            age_millis,
            flags,
            decision: None,
        }
    }

    pub fn request(&self) -> &'a D::Request {
        self.request
    }

    /// The cached value, or `None` when the cache has no answer (a miss)
    pub fn cached_result(&self) -> Option<&'a D::CachedResult> {
        self.cached_result
    }

    pub fn age_millis(&self) -> i64 {
        self.age_millis
    }

    /// Trust the cached result if it is no older than `value` `unit`s,
    /// otherwise require a check. The boundary is inclusive.
    pub fn cache_for(&mut self, value: i64, unit: TimeUnit) {
        let timeout_millis = unit.to_millis(value);
        trace!(
            "{} {}: age {}ms against window {} {} ({}ms)",
            D::NAME,
            self.request,
            self.age_millis,
            value,
            unit,
            timeout_millis
        );
        if self.age_millis <= timeout_millis {
            self.decide(Decision::UseCachedResult);
        } else {
            self.decide(Decision::MustCheck);
        }
    }

    pub fn use_cached_result(&mut self) {
        self.decide(Decision::UseCachedResult);
    }

    pub fn refresh(&mut self) {
        self.decide(Decision::MustCheck);
    }

    fn decide(&mut self, decision: Decision) {
        self.decision = Some(decision);
    }

    /// The latest verdict, if any rule has rendered one
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    pub fn rule_matched(&self) -> bool {
        self.decision.is_some()
    }

    /// Only meaningful once [`rule_matched`](Self::rule_matched) is true
    pub fn must_check(&self) -> bool {
        self.decision.is_some_and(|decision| decision.must_check())
    }
}

impl ResolutionControl<'_, Modules> {
    pub fn is_changing(&self) -> bool {
        self.flags.changing
    }
}

impl ResolutionControl<'_, Artifacts> {
    pub fn belongs_to_changing_module(&self) -> bool {
        self.flags.belongs_to_changing_module
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DAY_MS: i64 = 86_400_000;

    fn module() -> ModuleIdentifier {
        ModuleIdentifier::new("com.acme", "core")
    }

    #[test]
    fn new_control_has_no_decision() {
        let request = module();
        let control = DependencyResolutionControl::new(&request, None, 0, ());

        assert!(!control.rule_matched());
        assert!(!control.must_check());
        assert_eq!(control.decision(), None);
    }

    #[rstest]
    #[case(0, false)]
    #[case(DAY_MS - 1, false)]
    #[case(DAY_MS, false)]
    #[case(DAY_MS + 1, true)]
    #[case(-5, false)]
    fn cache_for_compares_age_against_window(#[case] age_millis: i64, #[case] expected: bool) {
        let request = module();
        let mut control = DependencyResolutionControl::new(&request, None, age_millis, ());

        control.cache_for(24, TimeUnit::Hours);

        assert!(control.rule_matched());
        assert_eq!(control.must_check(), expected);
    }

    #[rstest]
    #[case(999, TimeUnit::Seconds, 1, false)]
    #[case(1_000, TimeUnit::Seconds, 1, false)]
    #[case(1_001, TimeUnit::Seconds, 1, true)]
    #[case(60_001, TimeUnit::Minutes, 1, true)]
    #[case(1, TimeUnit::Days, 0, true)]
    fn cache_for_converts_unit_to_millis(
        #[case] age_millis: i64,
        #[case] unit: TimeUnit,
        #[case] value: i64,
        #[case] expected: bool,
    ) {
        let request = module();
        let mut control = DependencyResolutionControl::new(&request, None, age_millis, ());

        control.cache_for(value, unit);

        assert_eq!(control.must_check(), expected);
    }

    #[test]
    fn later_mutator_overwrites_verdict_but_never_unmatches() {
        let request = module();
        let mut control = DependencyResolutionControl::new(&request, None, 0, ());

        control.refresh();
        assert_eq!(control.decision(), Some(Decision::MustCheck));

        control.use_cached_result();
        assert!(control.rule_matched());
        assert_eq!(control.decision(), Some(Decision::UseCachedResult));

        control.cache_for(0, TimeUnit::Seconds);
        assert!(control.rule_matched());
        assert!(!control.must_check());
    }

    #[test]
    fn module_control_exposes_changing_flag_and_cached_result() {
        let request = ModuleVersionIdentifier::new("com.acme", "core", "1.0-SNAPSHOT");
        let resolved = ResolvedModuleVersion::new(request.clone());
        let control = ModuleResolutionControl::new(
            &request,
            Some(&resolved),
            42,
            ModuleFlags { changing: true },
        );

        assert!(control.is_changing());
        assert_eq!(control.request(), &request);
        assert_eq!(control.cached_result(), Some(&resolved));
        assert_eq!(control.age_millis(), 42);
    }

    #[test]
    fn artifact_control_exposes_changing_module_flag() {
        let module_version = ModuleVersionIdentifier::new("com.acme", "core", "1.0");
        let request = ArtifactIdentifier::new(module_version, "core", "jar", "jar");
        let control = ArtifactResolutionControl::new(
            &request,
            None,
            0,
            ArtifactFlags {
                belongs_to_changing_module: true,
            },
        );

        assert!(control.belongs_to_changing_module());
        assert!(control.cached_result().is_none());
    }
}
