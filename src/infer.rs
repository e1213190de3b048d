use crate::error::{Error, Result};
use crate::util::VecSet;
use crate::{Config, Predicate, Rule};
use rayon::prelude::*;

/// Ground facts in read order followed by derivation order, without
/// duplicates.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FactBase {
    facts: VecSet<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saturation {
    /// Passes run, including the final one that derived nothing.
    pub passes: u32,
    /// Facts added on top of the starting fact base.
    pub derived: usize,
}

impl FactBase {
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns false if the fact was already present. Non-ground predicates
    /// are refused.
    pub fn insert(&mut self, fact: Predicate) -> bool {
        if !fact.is_ground() {
            tracing::warn!(fact = %fact, "refusing non-ground fact");
            return false;
        }
        self.facts.insert(fact)
    }
    pub fn contains(&self, fact: &Predicate) -> bool {
        self.facts.contains(fact)
    }
    pub fn len(&self) -> usize {
        self.facts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
    pub fn as_slice(&self) -> &[Predicate] {
        self.facts.as_slice()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.facts.as_slice().iter()
    }
    pub fn into_vec(self) -> Vec<Predicate> {
        self.facts.into_vec()
    }

    /// New facts `rule` derives from the current fact base.
    pub fn conclusions(&self, rule: &Rule) -> Vec<Predicate> {
        rule.conclusions(self.as_slice(), |fact| self.contains(fact))
    }

    /// Applies every rule once to the same snapshot, then merges what they
    /// derived in rule order. Returns the number of facts added.
    pub fn pass(&mut self, rules: &[Rule], config: &Config) -> usize {
        let derived: Vec<Vec<Predicate>> = if config.parallel {
            rules.par_iter().map(|rule| self.conclusions(rule)).collect()
        } else {
            rules.iter().map(|rule| self.conclusions(rule)).collect()
        };
        let before = self.len();
        for fact in derived.into_iter().flatten() {
            self.insert(fact);
        }
        self.len() - before
    }

    /// Runs passes until one adds nothing.
    pub fn saturate(&mut self, rules: &[Rule], config: &Config) -> Result<Saturation> {
        let start = self.len();
        let mut passes = 0;
        loop {
            if config.max_passes.is_some_and(|max| passes >= max) {
                return Err(Error::PassLimit { passes });
            }
            passes += 1;
            let added = self.pass(rules, config);
            tracing::debug!(pass = passes, added, total = self.len(), "pass complete");
            if added == 0 {
                let saturation = Saturation { passes, derived: self.len() - start };
                tracing::info!(
                    passes = saturation.passes,
                    derived = saturation.derived,
                    total = self.len(),
                    "fixpoint reached"
                );
                return Ok(saturation);
            }
        }
    }
}

impl FromIterator<Predicate> for FactBase {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        let mut base = Self::new();
        for fact in iter {
            base.insert(fact);
        }
        base
    }
}

/// The deductive closure of `facts` under `rules`.
pub fn closure(
    facts: impl IntoIterator<Item = Predicate>,
    rules: &[Rule],
    config: &Config,
) -> Result<FactBase> {
    let mut base: FactBase = facts.into_iter().collect();
    base.saturate(rules, config)?;
    Ok(base)
}
