//! Sequential multi-rule ordering.
//!
//! Applies rules in sequence, consulting the next rule only when every
//! earlier rule ties, then falls back to a final tie-breaker so the
//! resulting order is total.

use std::cmp::Ordering;

use super::GuestOrdering;
use crate::generator::RunGuest;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Position in the initial guest pool (default).
    #[default]
    Registration,
    /// Lexicographic by guest ID.
    ById,
}

/// A composable ordering built from several rules.
///
/// # Example
/// ```
/// use u_timetable::ordering::{rules, OrderingChain};
///
/// let chain = OrderingChain::new()
///     .with_rule(rules::UnmetMinimums)
///     .with_rule(rules::FewestTimeslots);
/// assert_eq!(chain.rule_names(), vec!["UNMET_MINIMUMS", "FEWEST_TIMESLOTS"]);
/// ```
#[derive(Debug, Default)]
pub struct OrderingChain {
    rules: Vec<Box<dyn GuestOrdering>>,
    tie_breaker: TieBreaker,
}

impl OrderingChain {
    /// Creates an empty chain (pure tie-breaker order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn with_rule<R: GuestOrdering + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the chained rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl GuestOrdering for OrderingChain {
    fn name(&self) -> &'static str {
        "CHAIN"
    }

    fn prepare(&mut self, guests: &[RunGuest]) {
        for rule in &mut self.rules {
            rule.prepare(guests);
        }
    }

    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering {
        for rule in &self.rules {
            let ord = rule.compare(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::Registration => a.registration().cmp(&b.registration()),
            TieBreaker::ById => a.id().cmp(b.id()),
        }
    }
}
