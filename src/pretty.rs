use crate::{Atom, Condition, Predicate, Rule};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.text())
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}(", self.relation)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let (children, sep) = match self {
            Self::Predicate(p) => return write!(f, "{}", p),
            Self::Group(child) => return write!(f, "({})", child),
            Self::And(children) => (children, " and "),
            Self::Or(children) => (children, " or "),
        };
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", sep)?;
            }
            match (self, child) {
                // `and` binds tighter than `or`
                (Self::And(_), Self::Or(_)) => write!(f, "({})", child)?,
                _ => write!(f, "{}", child)?,
            }
        }
        Ok(())
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "if {} then {}", self.condition(), self.conclusion())
    }
}

impl Debug for Atom {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        Display::fmt(self, f)
    }
}
impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        Display::fmt(self, f)
    }
}
impl Debug for Condition {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Predicate(p) => write!(f, "{}", p),
            Self::Group(child) => f.debug_tuple("Group").field(child).finish(),
            Self::And(children) => f.debug_tuple("And").field(children).finish(),
            Self::Or(children) => f.debug_tuple("Or").field(children).finish(),
        }
    }
}
impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        Display::fmt(self, f)
    }
}
