//! Guest model.
//!
//! A guest is a participant competing for rooms: a player on a roster,
//! a volunteer on a rota. Each guest carries tags for constraint
//! predicates and a ranked list of room preferences.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A guest's desired occupancy range for one room.
///
/// Bounds are cumulative over the whole run, not per timeslot:
/// `max_desired = 3` means "at most three timeslots in this room".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPreference {
    /// Preferred room ID.
    pub room_id: String,
    /// Fewest timeslots the guest wants in this room.
    #[serde(default)]
    pub min_desired: u32,
    /// Most timeslots the guest wants in this room.
    pub max_desired: u32,
}

impl RoomPreference {
    /// Creates a preference with the given upper bound.
    pub fn new(room_id: impl Into<String>, max_desired: u32) -> Self {
        Self {
            room_id: room_id.into(),
            min_desired: 0,
            max_desired,
        }
    }

    /// Sets the lower bound.
    pub fn with_min(mut self, min_desired: u32) -> Self {
        self.min_desired = min_desired;
        self
    }
}

/// A guest to be assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Unique guest identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Free-form labels read by constraint predicates.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// How many timeslots the guest would like overall (advisory).
    #[serde(default)]
    pub desired_timeslots: u32,
    /// Room preferences, most preferred first.
    #[serde(default)]
    pub desired_rooms: Vec<RoomPreference>,
}

impl Guest {
    /// Creates a guest with no tags and no preferences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            tags: BTreeSet::new(),
            desired_timeslots: 0,
            desired_rooms: Vec::new(),
        }
    }

    /// Sets the guest name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Sets the desired number of timeslots.
    pub fn with_desired_timeslots(mut self, timeslots: u32) -> Self {
        self.desired_timeslots = timeslots;
        self
    }

    /// Appends a room preference.
    pub fn with_preference(mut self, preference: RoomPreference) -> Self {
        self.desired_rooms.push(preference);
        self
    }

    /// Appends a preference for `room_id` with bounds `0..=max_desired`.
    pub fn prefers(self, room_id: impl Into<String>, max_desired: u32) -> Self {
        self.with_preference(RoomPreference::new(room_id, max_desired))
    }

    /// Whether the guest carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// The preference for a room, if any.
    pub fn preference_for(&self, room_id: &str) -> Option<&RoomPreference> {
        self.desired_rooms.iter().find(|p| p.room_id == room_id)
    }
}

/// The ordered set of guests for a run.
///
/// A guest's position is its registration order, which the default
/// ordering heuristic uses to break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestPool {
    guests: Vec<Guest>,
}

impl GuestPool {
    /// Creates a pool from guests in registration order.
    pub fn new(guests: Vec<Guest>) -> Self {
        Self { guests }
    }

    /// Builder: registers a guest.
    pub fn with_guest(mut self, guest: Guest) -> Self {
        self.guests.push(guest);
        self
    }

    /// Finds a guest by ID.
    pub fn get(&self, id: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    /// Registration index of a guest.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.guests.iter().position(|g| g.id == id)
    }

    /// Guests in registration order.
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Number of guests.
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

impl From<Vec<Guest>> for GuestPool {
    fn from(guests: Vec<Guest>) -> Self {
        Self::new(guests)
    }
}
