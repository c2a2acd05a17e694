//! Run-scoped guest state.

use serde::Serialize;

use crate::models::{Guest, RoomPreference};

/// Progress of one room preference during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceProgress {
    /// The guest's declared preference.
    pub preference: RoomPreference,
    /// Timeslots assigned to this room so far.
    pub assigned: u32,
}

impl PreferenceProgress {
    fn new(preference: RoomPreference) -> Self {
        Self {
            preference,
            assigned: 0,
        }
    }

    /// Preferred room ID.
    #[inline]
    pub fn room_id(&self) -> &str {
        &self.preference.room_id
    }

    /// Assignments left before `max_desired` is reached.
    #[inline]
    pub fn headroom(&self) -> u32 {
        self.preference.max_desired.saturating_sub(self.assigned)
    }

    /// Whether `max_desired` has been reached.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.assigned >= self.preference.max_desired
    }

    /// Whether the guest is still short of `min_desired` here.
    #[inline]
    pub fn below_minimum(&self) -> bool {
        self.assigned < self.preference.min_desired
    }
}

/// A guest augmented with cumulative counters for one run.
///
/// Created at run start, mutated only by the generator. Callers see
/// cloned snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunGuest {
    guest: Guest,
    registration: usize,
    assigned_timeslots: u32,
    preferences: Vec<PreferenceProgress>,
}

impl RunGuest {
    /// Wraps a guest registered at position `registration`.
    pub fn new(guest: Guest, registration: usize) -> Self {
        let preferences = guest
            .desired_rooms
            .iter()
            .cloned()
            .map(PreferenceProgress::new)
            .collect();
        Self {
            guest,
            registration,
            assigned_timeslots: 0,
            preferences,
        }
    }

    /// The immutable guest record.
    pub fn guest(&self) -> &Guest {
        &self.guest
    }

    /// Guest ID.
    pub fn id(&self) -> &str {
        &self.guest.id
    }

    /// Position in the initial guest pool.
    pub fn registration(&self) -> usize {
        self.registration
    }

    /// Timeslots in which the guest held any room so far.
    pub fn assigned_timeslots(&self) -> u32 {
        self.assigned_timeslots
    }

    /// Preference progress, in preference order.
    pub fn preferences(&self) -> &[PreferenceProgress] {
        &self.preferences
    }

    /// Timeslots assigned to `room_id` through a matching preference.
    ///
    /// Returns 0 when the guest has no preference for the room, even if an
    /// override placed them there.
    pub fn assigned_to(&self, room_id: &str) -> u32 {
        self.preferences
            .iter()
            .filter(|p| p.room_id() == room_id)
            .map(|p| p.assigned)
            .sum()
    }

    /// `assigned_timeslots - desired_timeslots` (negative = still wants more).
    pub fn timeslot_surplus(&self) -> i64 {
        i64::from(self.assigned_timeslots) - i64::from(self.guest.desired_timeslots)
    }

    /// Number of preferences still below `min_desired`.
    pub fn unmet_minimums(&self) -> usize {
        self.preferences.iter().filter(|p| p.below_minimum()).count()
    }

    /// Records one timeslot spent in `room_id`.
    pub(crate) fn record_assignment(&mut self, room_id: &str) {
        self.assigned_timeslots += 1;
        for p in self.preferences.iter_mut().filter(|p| p.room_id() == room_id) {
            p.assigned += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunGuest {
        let g = Guest::new("G1")
            .with_desired_timeslots(3)
            .prefers("P", 2)
            .with_preference(RoomPreference::new("C", 4).with_min(1));
        RunGuest::new(g, 5)
    }

    #[test]
    fn test_new_run_guest_is_zeroed() {
        let rg = sample();
        assert_eq!(rg.id(), "G1");
        assert_eq!(rg.registration(), 5);
        assert_eq!(rg.assigned_timeslots(), 0);
        assert_eq!(rg.preferences().len(), 2);
        assert!(rg.preferences().iter().all(|p| p.assigned == 0));
        assert_eq!(rg.unmet_minimums(), 1);
        assert_eq!(rg.timeslot_surplus(), -3);
    }

    #[test]
    fn test_record_matching_preference() {
        let mut rg = sample();
        rg.record_assignment("C");
        assert_eq!(rg.assigned_timeslots(), 1);
        assert_eq!(rg.assigned_to("C"), 1);
        assert_eq!(rg.assigned_to("P"), 0);
        assert_eq!(rg.unmet_minimums(), 0);
    }

    #[test]
    fn test_record_unpreferred_room() {
        let mut rg = sample();
        rg.record_assignment("SS");
        assert_eq!(rg.assigned_timeslots(), 1);
        assert_eq!(rg.assigned_to("SS"), 0);
        assert_eq!(rg.assigned_to("P"), 0);
    }

    #[test]
    fn test_headroom_and_exhaustion() {
        let mut rg = sample();
        rg.record_assignment("P");
        assert_eq!(rg.preferences()[0].headroom(), 1);
        rg.record_assignment("P");
        assert_eq!(rg.preferences()[0].headroom(), 0);
        assert!(rg.preferences()[0].is_exhausted());

        rg.record_assignment("P");
        assert_eq!(rg.preferences()[0].headroom(), 0);
        assert_eq!(rg.assigned_to("P"), 3);
    }
}
