//! Line-oriented fact and rule files.
//!
//! Both formats hold one item per line. A line that does not parse is logged,
//! collected as a [`LineError`] and skipped; the rest of the file still loads.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Error, LineError, ParseError, Result};
use crate::parse::{predicate_line, rule_line};
use crate::{Config, Predicate, Rule, Saturation};

#[derive(Debug)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub errors: Vec<LineError>,
}

fn parse_lines<T>(
    file: &str,
    text: &str,
    parse_line: impl Fn(&str) -> std::result::Result<Option<T>, ParseError>,
) -> Loaded<T> {
    let mut loaded = Loaded { items: vec![], errors: vec![] };
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line.trim()) {
            Ok(Some(item)) => loaded.items.push(item),
            Ok(None) => {}
            Err(error) => {
                let error = LineError { file: file.to_string(), line: idx + 1, error };
                tracing::warn!("{}", error);
                loaded.errors.push(error);
            }
        }
    }
    loaded
}

fn fact_line(line: &str) -> std::result::Result<Option<Predicate>, ParseError> {
    match predicate_line(line)? {
        Some(fact) if !fact.is_ground() => Err(ParseError::NonGroundFact {
            variables: fact.variables().map(|v| v.to_string()).collect(),
        }),
        fact => Ok(fact),
    }
}

/// `file` only names the source in error reports.
pub fn parse_facts(file: &str, text: &str) -> Loaded<Predicate> {
    parse_lines(file, text, fact_line)
}

pub fn parse_rules(file: &str, text: &str) -> Loaded<Rule> {
    parse_lines(file, text, rule_line)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.into(), source })
}

pub fn read_facts(path: impl AsRef<Path>) -> Result<Loaded<Predicate>> {
    let path = path.as_ref();
    Ok(parse_facts(&path.display().to_string(), &read(path)?))
}

pub fn read_rules(path: impl AsRef<Path>) -> Result<Loaded<Rule>> {
    let path = path.as_ref();
    Ok(parse_rules(&path.display().to_string(), &read(path)?))
}

/// One `Relation(a, b)` per line.
pub fn format_facts<'a>(facts: impl IntoIterator<Item = &'a Predicate>) -> String {
    let mut out = String::new();
    for fact in facts {
        let _ = writeln!(out, "{}", fact);
    }
    out
}

pub fn write_facts<'a>(
    path: impl AsRef<Path>,
    facts: impl IntoIterator<Item = &'a Predicate>,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format_facts(facts))
        .map_err(|source| Error::Io { path: path.into(), source })
}

/// Reads facts and rules, computes the closure and writes it to `output`.
pub fn run(
    facts: impl AsRef<Path>,
    rules: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &Config,
) -> Result<Saturation> {
    let facts = read_facts(facts)?;
    let rules = read_rules(rules)?;
    let mut base: crate::FactBase = facts.items.into_iter().collect();
    let saturation = base.saturate(&rules.items, config)?;
    write_facts(output, base.iter())?;
    Ok(saturation)
}
