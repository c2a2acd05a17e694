//! Timetable (per-timeslot solution) model.
//!
//! A timetable maps each room to the ordered list of guests assigned to
//! it for exactly one timeslot. Guests absent from every list sat out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::RoomCatalog;

/// Room → guests assignment for one timeslot.
///
/// Serializes as a plain `{ room_id: [guest_id, ...] }` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    rooms: BTreeMap<String, Vec<String>>,
}

impl Timetable {
    /// Creates a timetable with no rooms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timetable with every catalog room mapped to an empty list.
    pub fn empty_for(catalog: &RoomCatalog) -> Self {
        Self {
            rooms: catalog
                .ids()
                .map(|id| (id.to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Builder: assigns a guest to a room.
    pub fn with_assignment(mut self, room_id: impl Into<String>, guest_id: impl Into<String>) -> Self {
        self.assign(room_id, guest_id);
        self
    }

    /// Appends a guest to a room's list, creating the room entry if needed.
    pub fn assign(&mut self, room_id: impl Into<String>, guest_id: impl Into<String>) {
        self.rooms
            .entry(room_id.into())
            .or_default()
            .push(guest_id.into());
    }

    /// Ensures a room entry exists (possibly empty).
    pub fn ensure_room(&mut self, room_id: &str) {
        if !self.rooms.contains_key(room_id) {
            self.rooms.insert(room_id.to_string(), Vec::new());
        }
    }

    /// Guests assigned to a room (empty if the room has no entry).
    pub fn guests_in(&self, room_id: &str) -> &[String] {
        self.rooms.get(room_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of guests assigned to a room.
    pub fn occupancy(&self, room_id: &str) -> usize {
        self.guests_in(room_id).len()
    }

    /// The room a guest is assigned to, if any.
    ///
    /// If the guest appears in several rooms, the first in ID order wins.
    pub fn room_of(&self, guest_id: &str) -> Option<&str> {
        self.rooms
            .iter()
            .find(|(_, guests)| guests.iter().any(|g| g == guest_id))
            .map(|(room, _)| room.as_str())
    }

    /// Whether a guest appears in any room.
    pub fn contains_guest(&self, guest_id: &str) -> bool {
        self.room_of(guest_id).is_some()
    }

    /// Room IDs with an entry, in ID order.
    pub fn room_ids(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// `(room_id, guests)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rooms.iter().map(|(r, g)| (r.as_str(), g.as_slice()))
    }

    /// Total number of assignments across all rooms.
    pub fn assignment_count(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    /// Whether no guest is assigned anywhere.
    pub fn is_empty(&self) -> bool {
        self.assignment_count() == 0
    }
}

impl From<BTreeMap<String, Vec<String>>> for Timetable {
    fn from(rooms: BTreeMap<String, Vec<String>>) -> Self {
        Self { rooms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Room;

    fn sample_timetable() -> Timetable {
        Timetable::new()
            .with_assignment("P", "G1")
            .with_assignment("OF", "G2")
            .with_assignment("OF", "G3")
    }

    #[test]
    fn test_empty_for_catalog() {
        let catalog = RoomCatalog::new(vec![Room::new("P"), Room::new("C")]);
        let t = Timetable::empty_for(&catalog);
        assert_eq!(t.room_ids().collect::<Vec<_>>(), vec!["C", "P"]);
        assert!(t.is_empty());
        assert_eq!(t.occupancy("P"), 0);
    }

    #[test]
    fn test_assign_keeps_order() {
        let t = sample_timetable();
        assert_eq!(t.guests_in("OF"), ["G2".to_string(), "G3".to_string()]);
        assert_eq!(t.occupancy("OF"), 2);
        assert_eq!(t.assignment_count(), 3);
    }

    #[test]
    fn test_room_of() {
        let t = sample_timetable();
        assert_eq!(t.room_of("G3"), Some("OF"));
        assert_eq!(t.room_of("G9"), None);
        assert!(t.contains_guest("G1"));
        assert!(!t.contains_guest("G9"));
    }

    #[test]
    fn test_unknown_room_is_empty() {
        let t = sample_timetable();
        assert!(t.guests_in("1B").is_empty());
    }

    #[test]
    fn test_ensure_room() {
        let mut t = sample_timetable();
        t.ensure_room("1B");
        t.ensure_room("P");
        assert_eq!(t.room_ids().count(), 3);
        assert_eq!(t.occupancy("P"), 1);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let t = Timetable::new().with_assignment("P", "G1");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"P":["G1"]}"#);

        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
