//! Guest ordering heuristics.
//!
//! Within a timeslot, guests compete for rooms one at a time. The
//! ordering decides who picks first.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ordering::{rules, OrderingChain, TieBreaker};
//!
//! // Least playing time first, then whoever is furthest below their
//! // desired timeslots, then alphabetical by guest ID.
//! let chain = OrderingChain::new()
//!     .with_rule(rules::FewestTimeslots)
//!     .with_rule(rules::LargestShortfall)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! ```

mod chain;
pub mod rules;

pub use chain::{OrderingChain, TieBreaker};

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::generator::RunGuest;

/// Decides which of two guests competes for rooms first.
///
/// # Convention
/// `Ordering::Less` means `a` picks before `b`.
pub trait GuestOrdering: Send + Debug {
    /// Rule name (e.g., "FEWEST_TIMESLOTS").
    fn name(&self) -> &'static str;

    /// Called once at run start with the guests in registration order.
    fn prepare(&mut self, _guests: &[RunGuest]) {}

    /// Compares two guests given their current run counters.
    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering;
}

/// Adapts a comparator closure into a [`GuestOrdering`].
pub struct FnOrdering<F> {
    name: &'static str,
    compare: F,
}

impl<F> FnOrdering<F>
where
    F: Fn(&RunGuest, &RunGuest) -> Ordering + Send,
{
    /// Wraps `compare` under the given name.
    pub fn new(name: &'static str, compare: F) -> Self {
        Self { name, compare }
    }
}

impl<F> GuestOrdering for FnOrdering<F>
where
    F: Fn(&RunGuest, &RunGuest) -> Ordering + Send,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<F> Debug for FnOrdering<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOrdering")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Sorts guest indices by `ordering` (highest priority first).
///
/// The sort is stable, so guests the ordering considers equal keep
/// registration order.
pub fn sort_indices(ordering: &dyn GuestOrdering, guests: &[RunGuest]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..guests.len()).collect();
    indices.sort_by(|&a, &b| ordering.compare(&guests[a], &guests[b]));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Guest;

    fn guests(ids: &[&str]) -> Vec<RunGuest> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| RunGuest::new(Guest::new(*id), i))
            .collect()
    }

    #[test]
    fn test_fn_ordering_reverse_id() {
        let gs = guests(&["A", "C", "B"]);
        let by_id_desc = FnOrdering::new("ID_DESC", |a: &RunGuest, b: &RunGuest| b.id().cmp(a.id()));
        let order = sort_indices(&by_id_desc, &gs);
        let ids: Vec<&str> = order.iter().map(|&i| gs[i].id()).collect();
        assert_eq!(ids, vec!["C", "B", "A"]);
        assert_eq!(by_id_desc.name(), "ID_DESC");
    }

    #[test]
    fn test_sort_is_stable() {
        let gs = guests(&["X", "Y", "Z"]);
        let all_equal = FnOrdering::new("EQ", |_: &RunGuest, _: &RunGuest| Ordering::Equal);
        assert_eq!(sort_indices(&all_equal, &gs), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_indices(&rules::FewestTimeslots, &[]).is_empty());
    }
}
