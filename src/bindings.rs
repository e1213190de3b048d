use std::collections::BTreeMap;

use crate::{Atom, Predicate, Text};

/// Variable to constant assignment for one experiment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Bindings(BTreeMap<Text, Text>);

impl Bindings {
    pub fn get(&self, var: &Text) -> Option<Text> {
        self.0.get(var).copied()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extends these bindings so that `template` matches `fact`, or gives
    /// `None` if it can't. Relations must agree, and so must arities; an
    /// arity mismatch is a plain non-match.
    pub fn unify(mut self, template: &Predicate, fact: &Predicate) -> Option<Self> {
        if template.relation != fact.relation || template.arity() != fact.arity() {
            return None;
        }
        for (pattern, concrete) in template.args.iter().zip(fact.args.iter()) {
            let value = concrete.constant()?;
            match pattern {
                Atom::Constant(c) if *c == value => {}
                Atom::Constant(_) => return None,
                Atom::Variable(v) => match self.0.get(v) {
                    Some(bound) if *bound == value => {}
                    Some(_) => return None,
                    None => {
                        self.0.insert(*v, value);
                    }
                },
            }
        }
        Some(self)
    }

    /// Replaces each bound variable in `template` by its value. Everything
    /// else is kept as is.
    pub fn substitute(&self, template: &Predicate) -> Predicate {
        let args = template
            .args
            .iter()
            .map(|arg| match arg {
                Atom::Variable(v) => self.get(v).map(Atom::Constant).unwrap_or(*arg),
                Atom::Constant(_) => *arg,
            })
            .collect();
        Predicate { relation: template.relation, args }
    }
}

impl FromIterator<(Text, Text)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Text, Text)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
