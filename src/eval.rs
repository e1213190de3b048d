//! Backtracking search for the bindings that satisfy a condition.
//!
//! An experiment assigns a candidate fact to every reachable predicate leaf
//! (and a branch to every `or`). `Cursor` walks through all experiments in
//! odometer order: the rightmost child of an `and` moves fastest, an `or`
//! exhausts its selected branch before moving to the next one. Each experiment
//! is checked against a fresh [`Bindings`], so nothing bound by one attempt is
//! visible to the next.

use std::collections::HashSet;

use crate::util::VecSet;
use crate::{Bindings, Condition, Predicate, Rule};

enum Cursor<'c> {
    Leaf {
        template: &'c Predicate,
        /// Index of the candidate fact, `None` once exhausted.
        at: Option<usize>,
    },
    And(Vec<Cursor<'c>>),
    Or {
        branches: &'c [Condition],
        selected: usize,
        /// `None` iff there are no branches.
        current: Option<Box<Cursor<'c>>>,
    },
    Group(Box<Cursor<'c>>),
}

/// First fact at or after `from` with the template's relation name.
fn candidate(template: &Predicate, facts: &[Predicate], from: usize) -> Option<usize> {
    let offset = facts.get(from..)?.iter().position(|fact| fact.relation == template.relation)?;
    Some(from + offset)
}

impl<'c> Cursor<'c> {
    fn first(condition: &'c Condition, facts: &[Predicate]) -> Self {
        match condition {
            Condition::Predicate(template) => {
                Self::Leaf { template, at: candidate(template, facts, 0) }
            }
            Condition::And(children) => {
                Self::And(children.iter().map(|child| Self::first(child, facts)).collect())
            }
            Condition::Or(branches) => Self::Or {
                branches,
                selected: 0,
                current: branches.first().map(|branch| Box::new(Self::first(branch, facts))),
            },
            Condition::Group(child) => Self::Group(Box::new(Self::first(child, facts))),
        }
    }

    fn reset(&mut self, facts: &[Predicate]) {
        match self {
            Self::Leaf { template, at } => *at = candidate(template, facts, 0),
            Self::And(children) => {
                for child in children {
                    child.reset(facts)
                }
            }
            Self::Or { branches, selected, current } => {
                let branches: &'c [Condition] = *branches;
                *selected = 0;
                *current = branches.first().map(|branch| Box::new(Self::first(branch, facts)));
            }
            Self::Group(child) => child.reset(facts),
        }
    }

    /// Moves to the next experiment. Returns false once every experiment of
    /// this subtree has been visited.
    fn advance(&mut self, facts: &[Predicate]) -> bool {
        match self {
            Self::Leaf { template, at } => {
                *at = at.and_then(|i| candidate(template, facts, i + 1));
                at.is_some()
            }
            Self::And(children) => {
                for child in children.iter_mut().rev() {
                    if child.advance(facts) {
                        return true;
                    }
                    // carry
                    child.reset(facts);
                }
                false
            }
            Self::Or { branches, selected, current } => {
                let branches: &'c [Condition] = *branches;
                let Some(current) = current else {
                    return false;
                };
                if current.advance(facts) {
                    return true;
                }
                if *selected + 1 < branches.len() {
                    *selected += 1;
                    **current = Self::first(&branches[*selected], facts);
                    true
                } else {
                    false
                }
            }
            Self::Group(child) => child.advance(facts),
        }
    }

    /// Checks the current experiment, extending `env` left to right.
    /// Never moves the cursor.
    fn bind(&self, facts: &[Predicate], env: Bindings) -> Option<Bindings> {
        match self {
            Self::Leaf { template, at } => env.unify(template, facts.get((*at)?)?),
            Self::And(children) => children.iter().try_fold(env, |env, child| child.bind(facts, env)),
            Self::Or { current, .. } => current.as_ref()?.bind(facts, env),
            Self::Group(child) => child.bind(facts, env),
        }
    }
}

/// Lazily yields every distinct [`Bindings`] under which a condition holds,
/// in deterministic experiment order.
pub struct Solutions<'c, 'f> {
    facts: &'f [Predicate],
    cursor: Cursor<'c>,
    exhausted: bool,
    experiments: usize,
    seen: HashSet<Bindings>,
}

impl Solutions<'_, '_> {
    /// Number of experiments checked so far.
    pub fn experiments(&self) -> usize {
        self.experiments
    }
}

impl Iterator for Solutions<'_, '_> {
    type Item = Bindings;
    fn next(&mut self) -> Option<Bindings> {
        while !self.exhausted {
            let env = self.cursor.bind(self.facts, Bindings::default());
            self.experiments += 1;
            self.exhausted = !self.cursor.advance(self.facts);
            match env {
                Some(env) if self.seen.insert(env.clone()) => return Some(env),
                _ => {}
            }
        }
        None
    }
}

impl Condition {
    pub fn solutions<'c, 'f>(&'c self, facts: &'f [Predicate]) -> Solutions<'c, 'f> {
        Solutions {
            facts,
            cursor: Cursor::first(self, facts),
            exhausted: false,
            experiments: 0,
            seen: HashSet::default(),
        }
    }
}

impl Rule {
    /// Every ground conclusion this rule draws from `facts` that is not
    /// `known`, each once, in the order first found. `facts` is only read.
    pub fn conclusions(
        &self,
        facts: &[Predicate],
        known: impl Fn(&Predicate) -> bool,
    ) -> Vec<Predicate> {
        let mut found = VecSet::default();
        let mut solutions = self.condition().solutions(facts);
        for env in &mut solutions {
            let conclusion = env.substitute(self.conclusion());
            if !conclusion.is_ground() {
                tracing::warn!(rule = %self, fact = %conclusion, "dropping non-ground conclusion");
                continue;
            }
            if !known(&conclusion) && found.insert(conclusion.clone()) {
                tracing::trace!(rule = %self, fact = %conclusion, "derived");
            }
        }
        tracing::debug!(
            rule = %self,
            experiments = solutions.experiments(),
            derived = found.len(),
            "rule evaluated"
        );
        found.into_vec()
    }
}
