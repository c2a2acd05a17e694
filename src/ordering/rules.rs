//! Built-in ordering rules.
//!
//! - **FEWEST_TIMESLOTS**: least playing time first, registration order on
//!   ties. The generator's default.
//! - **LARGEST_SHORTFALL**: furthest below `desired_timeslots` first.
//! - **UNMET_MINIMUMS**: most preferences still below `min_desired` first.
//! - **SHUFFLED_REGISTRATION**: like FEWEST_TIMESLOTS, with a seeded random
//!   registration order on ties.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;

use super::GuestOrdering;
use crate::generator::RunGuest;

/// Fewest assigned timeslots first; ties by registration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestTimeslots;

impl GuestOrdering for FewestTimeslots {
    fn name(&self) -> &'static str {
        "FEWEST_TIMESLOTS"
    }

    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering {
        a.assigned_timeslots()
            .cmp(&b.assigned_timeslots())
            .then_with(|| a.registration().cmp(&b.registration()))
    }
}

/// Largest shortfall against `desired_timeslots` first.
///
/// A guest who wanted 6 timeslots and has 2 outranks one who wanted 3 and
/// has 1. Guests at or above their desire sort last.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestShortfall;

impl GuestOrdering for LargestShortfall {
    fn name(&self) -> &'static str {
        "LARGEST_SHORTFALL"
    }

    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering {
        a.timeslot_surplus().cmp(&b.timeslot_surplus())
    }
}

/// Most preferences below `min_desired` first.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnmetMinimums;

impl GuestOrdering for UnmetMinimums {
    fn name(&self) -> &'static str {
        "UNMET_MINIMUMS"
    }

    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering {
        b.unmet_minimums().cmp(&a.unmet_minimums())
    }
}

/// Fewest assigned timeslots first; ties by a seeded shuffle of
/// registration order.
///
/// The shuffle is drawn once per run in [`GuestOrdering::prepare`], so the
/// tie order is stable within a run and reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct ShuffledRegistration {
    seed: u64,
    ranks: Vec<usize>,
}

impl ShuffledRegistration {
    /// Creates the rule with a shuffle seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ranks: Vec::new(),
        }
    }

    fn rank(&self, guest: &RunGuest) -> usize {
        self.ranks
            .get(guest.registration())
            .copied()
            .unwrap_or(guest.registration())
    }
}

impl GuestOrdering for ShuffledRegistration {
    fn name(&self) -> &'static str {
        "SHUFFLED_REGISTRATION"
    }

    fn prepare(&mut self, guests: &[RunGuest]) {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut ranks: Vec<usize> = (0..guests.len()).collect();
        ranks.shuffle(&mut rng);
        self.ranks = ranks;
    }

    fn compare(&self, a: &RunGuest, b: &RunGuest) -> Ordering {
        a.assigned_timeslots()
            .cmp(&b.assigned_timeslots())
            .then_with(|| self.rank(a).cmp(&self.rank(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Guest, RoomPreference};
    use crate::ordering::sort_indices;

    fn run_guest(id: &str, registration: usize, played: u32) -> RunGuest {
        let mut rg = RunGuest::new(Guest::new(id), registration);
        for _ in 0..played {
            rg.record_assignment("BENCH");
        }
        rg
    }

    fn ids(guests: &[RunGuest], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| guests[i].id().to_string()).collect()
    }

    #[test]
    fn test_fewest_timeslots() {
        let gs = vec![
            run_guest("A", 0, 2),
            run_guest("B", 1, 0),
            run_guest("C", 2, 1),
            run_guest("D", 3, 0),
        ];
        let order = sort_indices(&FewestTimeslots, &gs);
        assert_eq!(ids(&gs, &order), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_fewest_timeslots_tie_uses_registration() {
        let a = run_guest("A", 4, 1);
        let b = run_guest("B", 2, 1);
        assert_eq!(FewestTimeslots.compare(&a, &b), Ordering::Greater);
        assert_eq!(FewestTimeslots.compare(&b, &a), Ordering::Less);
        assert_eq!(FewestTimeslots.compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_largest_shortfall() {
        let wants_six = RunGuest::new(Guest::new("A").with_desired_timeslots(6), 0);
        let wants_two = RunGuest::new(Guest::new("B").with_desired_timeslots(2), 1);
        assert_eq!(
            LargestShortfall.compare(&wants_six, &wants_two),
            Ordering::Less
        );
    }

    #[test]
    fn test_unmet_minimums() {
        let needy = RunGuest::new(
            Guest::new("A")
                .with_preference(RoomPreference::new("P", 3).with_min(1))
                .with_preference(RoomPreference::new("C", 3).with_min(2)),
            0,
        );
        let content = RunGuest::new(Guest::new("B").prefers("P", 3), 1);
        assert_eq!(UnmetMinimums.compare(&needy, &content), Ordering::Less);
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let gs: Vec<RunGuest> = (0..8).map(|i| run_guest(&format!("G{i}"), i, 0)).collect();

        let mut first = ShuffledRegistration::new(42);
        first.prepare(&gs);
        let mut second = ShuffledRegistration::new(42);
        second.prepare(&gs);

        assert_eq!(sort_indices(&first, &gs), sort_indices(&second, &gs));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let gs: Vec<RunGuest> = (0..8).map(|i| run_guest(&format!("G{i}"), i, 0)).collect();
        let mut rule = ShuffledRegistration::new(7);
        rule.prepare(&gs);

        let mut order = sort_indices(&rule, &gs);
        order.sort_unstable();
        assert_eq!(order, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_still_prefers_fewest_timeslots() {
        let gs = vec![run_guest("A", 0, 3), run_guest("B", 1, 0)];
        let mut rule = ShuffledRegistration::new(1);
        rule.prepare(&gs);
        assert_eq!(ids(&gs, &sort_indices(&rule, &gs)), vec!["B", "A"]);
    }
}
