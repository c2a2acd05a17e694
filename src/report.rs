//! Fulfillment metrics for a generated sequence of timetables.
//!
//! Summarizes how well a run honored what guests asked for. Works on a
//! finished run or any prefix of one.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Timeslots played | Timetables in which the guest holds any room |
//! | Shortfall | max(0, desired_timeslots - played) |
//! | Preference count | Timetables in which the guest holds that room |
//! | Unassigned | Guests without a room in a timeslot |
//! | Underfilled | Rooms below `min_occupancy` in a timeslot |
//! | Fill rate | Seats used / (total capacity * timeslots) |

use serde::Serialize;

use crate::models::{GuestPool, RoomCatalog, Timetable};

/// How one preference turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceFulfillment {
    /// Preferred room.
    pub room_id: String,
    /// Timeslots spent in the room.
    pub assigned: u32,
    /// Requested lower bound.
    pub min_desired: u32,
    /// Requested upper bound.
    pub max_desired: u32,
}

impl PreferenceFulfillment {
    /// Fewer timeslots than the guest wanted at minimum.
    pub fn below_minimum(&self) -> bool {
        self.assigned < self.min_desired
    }

    /// More timeslots than the guest wanted at most. Only overrides can
    /// cause this.
    pub fn above_maximum(&self) -> bool {
        self.assigned > self.max_desired
    }
}

/// How one guest's run turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestFulfillment {
    /// Guest ID.
    pub guest_id: String,
    /// Timeslots in which the guest held a room.
    pub timeslots_played: u32,
    /// Timeslots the guest asked for.
    pub desired_timeslots: u32,
    /// Per-preference outcome, in preference order.
    pub preferences: Vec<PreferenceFulfillment>,
}

impl GuestFulfillment {
    /// Timeslots still missing against `desired_timeslots`.
    pub fn shortfall(&self) -> u32 {
        self.desired_timeslots.saturating_sub(self.timeslots_played)
    }
}

/// Per-timeslot gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeslotSummary {
    /// Zero-based timeslot index.
    pub index: usize,
    /// Guests without a room, in registration order.
    pub unassigned: Vec<String>,
    /// Rooms holding fewer than `min_occupancy` guests, in catalog order.
    pub underfilled_rooms: Vec<String>,
}

/// Fulfillment indicators for a run.
#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentReport {
    /// Per-guest outcomes, in registration order.
    pub guests: Vec<GuestFulfillment>,
    /// Per-timeslot gaps, in timeslot order.
    pub timeslots: Vec<TimeslotSummary>,
    /// Fraction of available seats that were used (0.0..1.0).
    pub fill_rate: f64,
}

impl FulfillmentReport {
    /// Computes the report from inputs and generated timetables.
    ///
    /// Timetable entries naming unknown guests or rooms are ignored.
    pub fn calculate(catalog: &RoomCatalog, guests: &GuestPool, timetables: &[Timetable]) -> Self {
        let guest_outcomes = guests
            .guests()
            .iter()
            .map(|guest| {
                let timeslots_played = timetables
                    .iter()
                    .filter(|t| t.contains_guest(&guest.id))
                    .count() as u32;

                let preferences = guest
                    .desired_rooms
                    .iter()
                    .map(|pref| PreferenceFulfillment {
                        room_id: pref.room_id.clone(),
                        assigned: timetables
                            .iter()
                            .filter(|t| t.guests_in(&pref.room_id).contains(&guest.id))
                            .count() as u32,
                        min_desired: pref.min_desired,
                        max_desired: pref.max_desired,
                    })
                    .collect();

                GuestFulfillment {
                    guest_id: guest.id.clone(),
                    timeslots_played,
                    desired_timeslots: guest.desired_timeslots,
                    preferences,
                }
            })
            .collect();

        let mut seats_used = 0usize;
        let timeslot_outcomes = timetables
            .iter()
            .enumerate()
            .map(|(index, t)| {
                seats_used += catalog.ids().map(|id| t.occupancy(id)).sum::<usize>();

                TimeslotSummary {
                    index,
                    unassigned: guests
                        .guests()
                        .iter()
                        .filter(|g| !t.contains_guest(&g.id))
                        .map(|g| g.id.clone())
                        .collect(),
                    underfilled_rooms: catalog
                        .rooms()
                        .iter()
                        .filter(|r| t.occupancy(&r.id) < r.min_occupancy as usize)
                        .map(|r| r.id.clone())
                        .collect(),
                }
            })
            .collect();

        let seats_available = catalog.total_capacity() * timetables.len();
        let fill_rate = if seats_available == 0 {
            0.0
        } else {
            seats_used as f64 / seats_available as f64
        };

        Self {
            guests: guest_outcomes,
            timeslots: timeslot_outcomes,
            fill_rate,
        }
    }

    /// Outcome for one guest.
    pub fn guest(&self, id: &str) -> Option<&GuestFulfillment> {
        self.guests.iter().find(|g| g.guest_id == id)
    }

    /// Sum of all guests' shortfalls.
    pub fn total_shortfall(&self) -> u32 {
        self.guests.iter().map(GuestFulfillment::shortfall).sum()
    }

    /// Preferences that ended below their minimum, as `(guest, room)`.
    pub fn unmet_minimums(&self) -> Vec<(&str, &str)> {
        self.guests
            .iter()
            .flat_map(|g| {
                g.preferences
                    .iter()
                    .filter(|p| p.below_minimum())
                    .map(move |p| (g.guest_id.as_str(), p.room_id.as_str()))
            })
            .collect()
    }

    /// Whether timeslots played differ by at most one across guests.
    pub fn is_balanced(&self) -> bool {
        let played = self.guests.iter().map(|g| g.timeslots_played);
        match (played.clone().min(), played.max()) {
            (Some(lo), Some(hi)) => hi - lo <= 1,
            _ => true,
        }
    }
}
