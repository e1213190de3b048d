use crate::files::{parse_facts, parse_rules};
use crate::{closure, Config, Error, FactBase, Predicate, Rule};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn facts(text: &str) -> Vec<Predicate> {
    let loaded = parse_facts("facts", text);
    assert!(loaded.errors.is_empty(), "{:?}", loaded.errors);
    loaded.items
}

fn rules(text: &str) -> Vec<Rule> {
    let loaded = parse_rules("rules", text);
    assert!(loaded.errors.is_empty(), "{:?}", loaded.errors);
    loaded.items
}

fn set(facts: impl IntoIterator<Item = Predicate>) -> HashSet<Predicate> {
    facts.into_iter().collect()
}

const FAMILY_FACTS: &str = "
Parent(ann, bob)
Parent(bob, cid)
Parent(cid, dee)
Female(ann)
Female(dee)
";

const FAMILY_RULES: &str = "
if Parent(_x, _y) then Ancestor(_x, _y)
if Ancestor(_x, _y) and Parent(_y, _z) then Ancestor(_x, _z)
if Parent(_x, _y) and Female(_x) then Mother(_x, _y)
if Mother(_x, _y) or (Parent(_x, _y) and Female(_y)) then Related(_x, _y)
";

#[test]
fn shared_variable_yields_every_binding() {
    let facts = facts("P(a, c)\nP(b, d)\nP(b, e)\nQ(b, f)");
    let rules = rules("if P(_x, _y) and Q(_x, _z) then R(_y)");
    let base = FactBase::from_iter(facts);
    assert_eq!(base.conclusions(&rules[0]), self::facts("R(d)\nR(e)"));
}

#[test]
fn or_derives_from_each_branch() {
    let base = closure(facts("P(a)\nQ(b)"), &rules("if P(_x) or Q(_x) then R(_x)"), &Config::default())
        .unwrap();
    assert_eq!(base.into_vec(), facts("P(a)\nQ(b)\nR(a)\nR(b)"));
}

#[test]
fn transitive_closure() {
    let base = closure(facts(FAMILY_FACTS), &rules(FAMILY_RULES), &Config::default()).unwrap();
    let got = set(base.into_vec());
    for expected in facts(
        "Ancestor(ann, bob)\nAncestor(ann, cid)\nAncestor(ann, dee)\nAncestor(bob, dee)\n\
         Mother(ann, bob)\nRelated(ann, bob)\nRelated(cid, dee)",
    ) {
        assert!(got.contains(&expected), "missing {expected}");
    }
    assert!(!got.contains(&Predicate::new("Mother", ["cid", "dee"])));
    // 5 given, 6 ancestors, 1 mother, 2 related
    assert_eq!(got.len(), 14);
}

#[test]
fn idempotent() {
    let rules = rules(FAMILY_RULES);
    let once = closure(facts(FAMILY_FACTS), &rules, &Config::default()).unwrap();
    let mut twice = once.clone();
    let saturation = twice.saturate(&rules, &Config::default()).unwrap();
    assert_eq!(saturation.derived, 0);
    assert_eq!(saturation.passes, 1);
    assert_eq!(twice, once);
}

#[test]
fn rule_order_does_not_matter() {
    let mut rules = rules(FAMILY_RULES);
    let forward = closure(facts(FAMILY_FACTS), &rules, &Config::default()).unwrap();
    rules.reverse();
    let backward = closure(facts(FAMILY_FACTS), &rules, &Config::default()).unwrap();
    assert_eq!(set(forward.into_vec()), set(backward.into_vec()));
}

#[test]
fn parallel_matches_sequential() {
    let rules = rules(FAMILY_RULES);
    let sequential = closure(facts(FAMILY_FACTS), &rules, &Config::default()).unwrap();
    let parallel =
        closure(facts(FAMILY_FACTS), &rules, &Config::default().parallel(true)).unwrap();
    assert_eq!(parallel.into_vec(), sequential.into_vec());
}

#[test]
fn no_duplicates() {
    // both rules derive the same facts in the same pass
    let rules = rules("if P(_x) then R(_x)\nif Q(_x) then R(_x)");
    let base = closure(facts("P(a)\nQ(a)\nP(a)"), &rules, &Config::default()).unwrap();
    let all = base.into_vec();
    assert_eq!(all.len(), set(all.clone()).len());
    assert_eq!(all, facts("P(a)\nQ(a)\nR(a)"));
}

#[test]
fn passes_see_a_snapshot() {
    // the second rule only fires on the pass after the first one
    let rules = rules("if A(_x) then B(_x)\nif B(_x) then C(_x)");
    let mut base = FactBase::from_iter(facts("A(a)"));
    assert_eq!(base.pass(&rules, &Config::default()), 1);
    assert!(!base.contains(&Predicate::new("C", ["a"])));
    assert_eq!(base.pass(&rules, &Config::default()), 1);
    assert_eq!(base.pass(&rules, &Config::default()), 0);
}

#[test]
fn rederiving_known_fact_terminates() {
    let rules = rules("if P(_x) then P(_x)\nif P(_x) and P(_y) then P(_y)");
    let mut base = FactBase::from_iter(facts("P(a)\nP(b)"));
    let saturation = base.saturate(&rules, &Config::default()).unwrap();
    assert_eq!(saturation.passes, 1);
    assert_eq!(saturation.derived, 0);
}

#[test]
fn pass_limit() {
    let rules = rules("if A(_x) then B(_x)\nif B(_x) then C(_x)");
    let config = Config::default().max_passes(Some(2));
    let err = closure(facts("A(a)"), &rules, &config).unwrap_err();
    assert!(matches!(err, Error::PassLimit { passes: 2 }));
    assert!(closure(facts("A(a)"), &rules, &config.max_passes(Some(3))).is_ok());
}

#[test]
fn malformed_rule_line_is_skipped() {
    let text = "if P(_x) then Q(_x)\nif P(_x) and then R(_x)\nif Q(_x) then S(_x)";
    let loaded = parse_rules("rules.txt", text);
    assert_eq!(loaded.items.len(), 2);
    assert_eq!(
        loaded.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["rules.txt, line 2: identifier expected instead of 'then'".to_string()]
    );
    let base = closure(facts("P(a)"), &loaded.items, &Config::default()).unwrap();
    assert_eq!(base.into_vec(), facts("P(a)\nQ(a)\nS(a)"));
}

#[test]
fn unbound_conclusion_variable_is_a_line_error() {
    let loaded = parse_rules("rules.txt", "if P(_x) or Q(_y) then R(_x)\nif P(_x) then R(_x)");
    assert_eq!(loaded.items.len(), 1);
    assert_eq!(
        loaded.errors[0].to_string(),
        "rules.txt, line 1: conclusion variable(s) _x not bound by the condition"
    );
}

#[test]
fn mixed_arity_relations_coexist() {
    let rules = rules("if P(_x, _y) then Pair(_x, _y)\nif P(_x) then Single(_x)");
    let base = closure(facts("P(a)\nP(b, c)"), &rules, &Config::default()).unwrap();
    let got = set(base.into_vec());
    assert!(got.contains(&Predicate::new("Pair", ["b", "c"])));
    assert!(got.contains(&Predicate::new("Single", ["a"])));
    assert_eq!(got.len(), 4);
}

#[test]
fn constants_in_conditions_and_conclusions() {
    let rules = rules("if Likes(_x, pizza) then Eats(_x, lunch)");
    let base =
        closure(facts("Likes(amy, pizza)\nLikes(bob, soup)"), &rules, &Config::default()).unwrap();
    assert!(base.contains(&Predicate::new("Eats", ["amy", "lunch"])));
    assert!(!base.contains(&Predicate::new("Eats", ["bob", "lunch"])));
}

#[test]
fn soundness_every_derived_fact_has_a_supporting_binding() {
    let rules = rules(FAMILY_RULES);
    let given = facts(FAMILY_FACTS);
    let base = closure(given.clone(), &rules, &Config::default()).unwrap();
    let all = base.as_slice();
    for fact in &all[given.len()..] {
        let supported = rules.iter().any(|rule| {
            rule.condition()
                .solutions(all)
                .any(|env| &env.substitute(rule.conclusion()) == fact)
        });
        assert!(supported, "{fact} has no supporting experiment");
    }
}

#[test]
fn nested_alternatives_derive_from_either_side() {
    let rules = rules("if (Z(_x) or P(_x)) and (Q(_x) or S(_x)) or S(_x) then R(_x)");
    let base = closure(facts("P(a)\nQ(a)\nS(b)"), &rules, &Config::default()).unwrap();
    assert_eq!(base.into_vec(), facts("P(a)\nQ(a)\nS(b)\nR(a)\nR(b)"));
}
