//! Pure guest predicates and their boolean combinators.

use serde::{Deserialize, Serialize};

use crate::models::Guest;

/// A side-effect-free test over a guest.
///
/// Combinators own their children but no mutable state, so a predicate
/// can be evaluated any number of times in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Always true.
    Always,
    /// True iff the guest carries the tag.
    HasTag(String),
    /// Negation.
    Not(Box<Predicate>),
    /// Conjunction. Empty conjunction is true.
    And(Vec<Predicate>),
    /// Disjunction. Empty disjunction is false.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Evaluates the predicate.
    ///
    /// `And`/`Or` evaluate every child before combining.
    pub fn evaluate(&self, guest: &Guest) -> bool {
        match self {
            Self::Always => true,
            Self::HasTag(tag) => guest.has_tag(tag),
            Self::Not(inner) => !inner.evaluate(guest),
            Self::And(children) => children
                .iter()
                .map(|p| p.evaluate(guest))
                .fold(true, |acc, e| acc && e),
            Self::Or(children) => children
                .iter()
                .map(|p| p.evaluate(guest))
                .fold(false, |acc, e| acc || e),
        }
    }

    /// Human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Self::Always => "always".to_string(),
            Self::HasTag(tag) => format!("has tag \"{tag}\""),
            Self::Not(inner) => format!("NOT ({})", inner.describe()),
            Self::And(children) => join(children, " AND "),
            Self::Or(children) => join(children, " OR "),
        }
    }
}

fn join(children: &[Predicate], sep: &str) -> String {
    children
        .iter()
        .map(|p| format!("({})", p.describe()))
        .collect::<Vec<_>>()
        .join(sep)
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Predicate that always holds.
pub fn always() -> Predicate {
    Predicate::Always
}

/// True iff the guest carries `tag`.
pub fn has_tag(tag: impl Into<String>) -> Predicate {
    Predicate::HasTag(tag.into())
}

/// Negates a predicate.
pub fn not(predicate: Predicate) -> Predicate {
    Predicate::Not(Box::new(predicate))
}

/// All predicates hold.
pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::And(predicates.into_iter().collect())
}

/// At least one predicate holds.
pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Or(predicates.into_iter().collect())
}
