//! Declarative run configuration.

use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintSpec;
use crate::models::{Guest, GuestPool, Room, RoomCatalog};

/// Input container for a generation run.
///
/// Everything a collaborator persists about a run: rooms, guests,
/// timeslot count and a declarative constraint library. Custom
/// constraints and orderings are attached on [`GeneratorBuilder`]
/// instead.
///
/// [`GeneratorBuilder`]: super::GeneratorBuilder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Number of timeslots to generate.
    pub timeslots: usize,
    /// Rooms, in display order.
    pub rooms: RoomCatalog,
    /// Guests, in registration order.
    pub guests: GuestPool,
    /// Constraint initializers, instantiated fresh per run.
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

impl GenerationRequest {
    /// Creates a request without constraints.
    pub fn new(timeslots: usize, rooms: impl Into<RoomCatalog>, guests: impl Into<GuestPool>) -> Self {
        Self {
            timeslots,
            rooms: rooms.into(),
            guests: guests.into(),
            constraints: Vec::new(),
        }
    }

    /// Appends a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms = self.rooms.with_room(room);
        self
    }

    /// Registers a guest.
    pub fn with_guest(mut self, guest: Guest) -> Self {
        self.guests = self.guests.with_guest(guest);
        self
    }

    /// Appends a constraint.
    pub fn with_constraint(mut self, constraint: ConstraintSpec) -> Self {
        self.constraints.push(constraint);
        self
    }
}
