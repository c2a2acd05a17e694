//! Room model.
//!
//! Rooms are the capacity-bounded roles guests are assigned to in each
//! timeslot: defensive positions, shifts, seats, stations. Occupancy bounds
//! apply to a single timeslot.

use serde::{Deserialize, Serialize};

/// A room that guests can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Fewest guests the room should hold in one timeslot (advisory).
    #[serde(default)]
    pub min_occupancy: u32,
    /// Most guests the room may hold in one timeslot.
    pub max_occupancy: u32,
}

impl Room {
    /// Creates a room holding at most one guest.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            min_occupancy: 0,
            max_occupancy: 1,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets both occupancy bounds.
    pub fn with_occupancy(mut self, min: u32, max: u32) -> Self {
        self.min_occupancy = min;
        self.max_occupancy = max;
        self
    }

    /// Sets the maximum occupancy.
    pub fn with_max_occupancy(mut self, max: u32) -> Self {
        self.max_occupancy = max;
        self
    }

    /// Whether `occupancy` guests leave space for one more.
    #[inline]
    pub fn has_space(&self, occupancy: usize) -> bool {
        occupancy < self.max_occupancy as usize
    }
}

/// The fixed, ordered set of rooms for a run.
///
/// Catalog order is the canonical room order: empty timetables,
/// settlement and reports all walk rooms in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Creates a catalog from rooms in display order.
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Builder: appends a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Finds a room by ID.
    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Whether a room with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Rooms in catalog order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Room IDs in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|r| r.id.as_str())
    }

    /// Sum of `max_occupancy` over all rooms.
    pub fn total_capacity(&self) -> usize {
        self.rooms.iter().map(|r| r.max_occupancy as usize).sum()
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl From<Vec<Room>> for RoomCatalog {
    fn from(rooms: Vec<Room>) -> Self {
        Self::new(rooms)
    }
}
