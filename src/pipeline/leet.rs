//! Leet-speak transformer.
//!
//! Each substitution rule is decided **once per call**: a rule either fires
//! for every occurrence in the text or for none. Rules run in declaration
//! order, each on the output of the previous one.

use rand::Rng;

/// One `from → to` substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeetRule {
    pub from: &'static str,
    pub to: &'static str,
}

const fn rule(from: &'static str, to: &'static str) -> LeetRule {
    LeetRule { from, to }
}

/// Substitution rules in application order.
pub const RULES: [LeetRule; 14] = [
    rule("a", "4"),
    rule("e", "3"),
    rule("i", "1"),
    rule("o", "0"),
    rule("t", "7"),
    rule("s", "5"),
    rule("A", "4"),
    rule("E", "3"),
    rule("I", "1"),
    rule("O", "0"),
    rule("T", "7"),
    rule("S", "5"),
    rule("ck", "x"),
    rule("CK", "X"),
];

/// Leet-ify `text`, firing each rule with `probability`.
///
/// Exactly one coin is drawn from `rng` per rule, whatever the input, so a
/// seeded generator stays in step with later pipeline stages.
pub fn transform<R: Rng + ?Sized>(text: &str, probability: f64, rng: &mut R) -> String {
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    transform_with(text, |_| rng.gen_bool(p))
}

/// Leet-ify `text`, asking `decide` whether each rule fires.
pub fn transform_with<F>(text: &str, mut decide: F) -> String
where
    F: FnMut(&LeetRule) -> bool,
{
    RULES.iter().fold(text.to_string(), |acc, rule| {
        if decide(rule) {
            acc.replace(rule.from, rule.to)
        } else {
            acc
        }
    })
}
