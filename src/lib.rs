//! Forward-chaining inference over predicate facts and `if ... then ...` rules.
//!
//! Facts are ground predicates such as `Parent(ann, bob)`. Rules have a
//! condition built from predicates with `and`, `or` and parentheses, and a
//! single conclusion, e.g. `if Parent(_x, _y) and Parent(_y, _z) then
//! Grandparent(_x, _z)`. Atoms starting with `_` are variables.
//! [`infer::closure`] computes the smallest superset of the facts closed under
//! all rules.

pub mod bindings;
pub mod check;
pub mod config;
pub mod error;
pub mod eval;
pub mod files;
pub mod infer;
pub mod lex;
pub mod parse;
pub mod pretty;
pub mod text;
pub mod util;

#[cfg(test)]
pub mod test;

pub use bindings::Bindings;
pub use config::Config;
pub use error::{Error, LineError, ParseError};
pub use infer::{closure, FactBase, Saturation};
pub use text::Text;

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub enum Atom {
    Constant(Text),
    Variable(Text),
}

/// `relation(args..)`. A fact is a predicate whose args are all constants.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone)]
pub struct Predicate {
    pub relation: Text,
    pub args: Vec<Atom>,
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Condition {
    And(Vec<Condition>),
    Or(Vec<Condition>),
    /// Parenthesised sub-condition.
    Group(Box<Condition>),
    Predicate(Predicate),
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Rule {
    condition: Condition,
    conclusion: Predicate,
}

impl Atom {
    pub fn new(s: &str) -> Self {
        if s.starts_with('_') {
            Self::Variable(Text::intern(s))
        } else {
            Self::Constant(Text::intern(s))
        }
    }
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
    pub fn constant(&self) -> Option<Text> {
        match self {
            Self::Constant(c) => Some(*c),
            Self::Variable(_) => None,
        }
    }
    pub fn text(&self) -> Text {
        match self {
            Self::Constant(t) | Self::Variable(t) => *t,
        }
    }
}

impl Predicate {
    pub fn new<'a>(relation: &str, args: impl IntoIterator<Item = &'a str>) -> Self {
        Self { relation: Text::intern(relation), args: args.into_iter().map(Atom::new).collect() }
    }
    pub fn arity(&self) -> usize {
        self.args.len()
    }
    pub fn is_ground(&self) -> bool {
        !self.args.iter().any(Atom::is_variable)
    }
    pub fn variables(&self) -> impl Iterator<Item = Text> + '_ {
        self.args.iter().filter_map(|arg| match arg {
            Atom::Variable(v) => Some(*v),
            Atom::Constant(_) => None,
        })
    }
}

impl Rule {
    /// Fails if the conclusion mentions a variable that some way of
    /// satisfying the condition leaves unbound.
    pub fn new(condition: Condition, conclusion: Predicate) -> Result<Self, ParseError> {
        let rule = Self { condition, conclusion };
        let unbound = rule.unbound_variables();
        if unbound.is_empty() {
            Ok(rule)
        } else {
            Err(ParseError::UnboundVariables {
                variables: unbound.iter().map(Text::to_string).collect(),
            })
        }
    }
    pub fn condition(&self) -> &Condition {
        &self.condition
    }
    pub fn conclusion(&self) -> &Predicate {
        &self.conclusion
    }
}
