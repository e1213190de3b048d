use std::collections::HashSet;

use crate::{Condition, Rule, Text};

impl Condition {
    /// Variables bound by every satisfying experiment of this condition.
    /// An `or` only guarantees what all of its branches bind.
    pub fn bound_variables(&self) -> HashSet<Text> {
        match self {
            Self::Predicate(p) => p.variables().collect(),
            Self::Group(child) => child.bound_variables(),
            Self::And(children) => children.iter().flat_map(Self::bound_variables).collect(),
            Self::Or(children) => {
                let mut iter = children.iter().map(Self::bound_variables);
                let first = iter.next().unwrap_or_default();
                iter.fold(first, |acc, set| acc.intersection(&set).copied().collect())
            }
        }
    }
}

impl Rule {
    /// Conclusion variables not bound by the condition, in conclusion order.
    pub fn unbound_variables(&self) -> Vec<Text> {
        let bound = self.condition.bound_variables();
        let mut unbound = vec![];
        for var in self.conclusion.variables() {
            if !bound.contains(&var) && !unbound.contains(&var) {
                unbound.push(var);
            }
        }
        unbound
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::rule_line;
    use crate::{Atom, Condition, ParseError, Predicate, Rule, Text};

    #[test]
    fn and_binds_union() {
        let rule = rule_line("if P(_x) and Q(_y) then R(_x, _y)").unwrap().unwrap();
        assert!(rule.unbound_variables().is_empty());
    }

    #[test]
    fn or_binds_intersection() {
        let err = rule_line("if P(_x, _y) or Q(_x) then R(_x, _y)").unwrap_err();
        assert_eq!(err, ParseError::UnboundVariables { variables: vec!["_y".into()] });
        assert!(rule_line("if (P(_x, _y) or Q(_x)) and S(_y) then R(_x, _y)").is_ok());
    }

    #[test]
    fn constant_conclusion_needs_nothing() {
        let condition = Condition::Predicate(Predicate::new("P", ["_x"]));
        let rule = Rule::new(condition, Predicate::new("Seen", ["something"])).unwrap();
        assert_eq!(rule.conclusion().args, vec![Atom::Constant(Text::intern("something"))]);
    }

    #[test]
    fn unbound_reported_once() {
        let condition = Condition::Predicate(Predicate::new("P", ["_x"]));
        let err = Rule::new(condition, Predicate::new("R", ["_z", "_x", "_z"])).unwrap_err();
        assert_eq!(err, ParseError::UnboundVariables { variables: vec!["_z".into()] });
    }
}
