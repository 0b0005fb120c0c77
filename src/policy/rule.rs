//! Ordered override rules for one resolution domain

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::policy::control::{ResolutionControl, ResolutionDomain};

/// A cache rule: inspects the control and may render a verdict on it
pub type Rule<D> = Arc<dyn Fn(&mut ResolutionControl<'_, D>) + Send + Sync>;

/// Rules for one domain, most recently registered first.
///
/// Cloning copies the sequence but shares the rule objects, so rules added to
/// a clone afterwards stay invisible to the original and vice versa.
pub struct RuleChain<D: ResolutionDomain> {
    rules: VecDeque<Rule<D>>,
}

impl<D: ResolutionDomain> RuleChain<D> {
    pub fn new() -> Self {
        Self {
            rules: VecDeque::new(),
        }
    }

    /// Register a rule ahead of every rule already in the chain
    pub fn push_front<F>(&mut self, rule: F)
    where
        F: Fn(&mut ResolutionControl<'_, D>) + Send + Sync + 'static,
    {
        self.rules.push_front(Arc::new(rule));
        trace!("Registered {} rule, chain now has {}", D::NAME, self.rules.len());
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Rule<D>> {
        self.rules.iter()
    }

    /// Run the chain front to back, stopping at the first rule that renders a
    /// verdict, and return whether the cached result must be checked.
    ///
    /// A chain that runs out without any match trusts the cache.
    pub fn evaluate(&self, control: &mut ResolutionControl<'_, D>) -> bool {
        for (position, rule) in self.rules.iter().enumerate() {
            rule(&mut *control);
            if let Some(decision) = control.decision() {
                debug!(
                    "{} rule #{} decided {:?} for {} (age {}ms)",
                    D::NAME,
                    position,
                    decision,
                    control.request(),
                    control.age_millis()
                );
                return decision.must_check();
            }
        }

        debug!(
            "No {} rule matched {}, using cached result",
            D::NAME,
            control.request()
        );
        false
    }
}

impl<D: ResolutionDomain> Default for RuleChain<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ResolutionDomain> Clone for RuleChain<D> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<D: ResolutionDomain> fmt::Debug for RuleChain<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("domain", &D::NAME)
            .field("rules", &self.rules.len())
            .finish()
    }
}
