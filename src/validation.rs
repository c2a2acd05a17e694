//! Input validation for timetabling runs.
//!
//! Checks structural integrity of rooms, guests and override timetables
//! before they reach the generator. Detects:
//! - Duplicate IDs
//! - References to unknown rooms or guests
//! - Inverted occupancy or preference bounds
//! - Non-positive timeslot counts
//! - Overrides that seat a guest twice or overfill a room
//!
//! All problems are collected, not just the first.

use std::collections::HashSet;

use crate::models::{GuestPool, RoomCatalog, Timetable};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A preference or override references a room that doesn't exist.
    InvalidRoomReference,
    /// An override references a guest that doesn't exist.
    InvalidGuestReference,
    /// A minimum bound exceeds its maximum.
    InvalidBounds,
    /// The run was configured with zero timeslots.
    NonPositiveTimeslots,
    /// An override lists the same guest more than once.
    DuplicateAssignment,
    /// An override puts more guests in a room than it can hold.
    CapacityExceeded,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the static inputs of a run.
///
/// Checks:
/// 1. At least one timeslot
/// 2. No duplicate room IDs, and `min_occupancy <= max_occupancy`
/// 3. No duplicate guest IDs
/// 4. Every preference points to an existing room, at most once per guest
/// 5. `min_desired <= max_desired` for every preference
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(catalog: &RoomCatalog, guests: &GuestPool, timeslots: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if timeslots == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveTimeslots,
            "Timeslot count must be positive",
        ));
    }

    let mut room_ids = HashSet::new();
    for room in catalog.rooms() {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
        if room.min_occupancy > room.max_occupancy {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBounds,
                format!(
                    "Room '{}' has min_occupancy {} above max_occupancy {}",
                    room.id, room.min_occupancy, room.max_occupancy
                ),
            ));
        }
    }

    let mut guest_ids = HashSet::new();
    for guest in guests.guests() {
        if !guest_ids.insert(guest.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate guest ID: {}", guest.id),
            ));
        }

        let mut preferred = HashSet::new();
        for pref in &guest.desired_rooms {
            if !room_ids.contains(pref.room_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRoomReference,
                    format!(
                        "Guest '{}' prefers unknown room '{}'",
                        guest.id, pref.room_id
                    ),
                ));
            }
            if !preferred.insert(pref.room_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "Guest '{}' lists room '{}' more than once",
                        guest.id, pref.room_id
                    ),
                ));
            }
            if pref.min_desired > pref.max_desired {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidBounds,
                    format!(
                        "Guest '{}' has min_desired {} above max_desired {} for room '{}'",
                        guest.id, pref.min_desired, pref.max_desired, pref.room_id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a caller-supplied timetable for a locked timeslot.
///
/// Checks:
/// 1. Every room ID exists in the catalog
/// 2. Every guest ID is one of `guest_ids`
/// 3. No guest appears more than once
/// 4. No room holds more than `max_occupancy` guests
pub fn validate_override<'a>(
    timetable: &Timetable,
    catalog: &RoomCatalog,
    guest_ids: impl IntoIterator<Item = &'a str>,
) -> ValidationResult {
    let known: HashSet<&str> = guest_ids.into_iter().collect();
    let mut errors = Vec::new();
    let mut seated = HashSet::new();

    for (room_id, guests) in timetable.iter() {
        match catalog.get(room_id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoomReference,
                format!("Override references unknown room '{room_id}'"),
            )),
            Some(room) if guests.len() > room.max_occupancy as usize => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CapacityExceeded,
                    format!(
                        "Override puts {} guests in room '{}' (max {})",
                        guests.len(),
                        room_id,
                        room.max_occupancy
                    ),
                ))
            }
            Some(_) => {}
        }

        for guest_id in guests {
            if !known.contains(guest_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidGuestReference,
                    format!("Override references unknown guest '{guest_id}'"),
                ));
            } else if !seated.insert(guest_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateAssignment,
                    format!("Override assigns guest '{guest_id}' more than once"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Guest, Room, RoomPreference};

    fn sample_catalog() -> RoomCatalog {
        RoomCatalog::new(vec![
            Room::new("P").with_name("Pitcher"),
            Room::new("C").with_name("Catcher"),
            Room::new("OF").with_name("Outfield").with_occupancy(1, 3),
        ])
    }

    fn sample_guests() -> GuestPool {
        GuestPool::new(vec![
            Guest::new("G1").prefers("P", 2).prefers("OF", 4),
            Guest::new("G2").prefers("C", 6),
            Guest::new("G3"),
        ])
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_catalog(), &sample_guests(), 6).is_ok());
    }

    #[test]
    fn test_zero_timeslots() {
        let errors = validate_input(&sample_catalog(), &sample_guests(), 0).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::NonPositiveTimeslots]);
    }

    #[test]
    fn test_duplicate_room_id() {
        let catalog = RoomCatalog::new(vec![Room::new("P"), Room::new("P")]);
        let errors = validate_input(&catalog, &GuestPool::default(), 1).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_duplicate_guest_id() {
        let guests = GuestPool::new(vec![Guest::new("G1"), Guest::new("G1")]);
        let errors = validate_input(&sample_catalog(), &guests, 1).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("guest")));
    }

    #[test]
    fn test_unknown_preferred_room() {
        let guests = GuestPool::new(vec![Guest::new("G1").prefers("DH", 3)]);
        let errors = validate_input(&sample_catalog(), &guests, 1).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InvalidRoomReference]);
    }

    #[test]
    fn test_repeated_preference() {
        let guests = GuestPool::new(vec![Guest::new("G1").prefers("P", 1).prefers("P", 2)]);
        let errors = validate_input(&sample_catalog(), &guests, 1).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::DuplicateId]);
    }

    #[test]
    fn test_inverted_bounds() {
        let catalog = RoomCatalog::new(vec![Room::new("P").with_occupancy(3, 1)]);
        let guests = GuestPool::new(vec![
            Guest::new("G1").with_preference(RoomPreference::new("P", 1).with_min(2))
        ]);
        let errors = validate_input(&catalog, &guests, 1).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![ValidationErrorKind::InvalidBounds, ValidationErrorKind::InvalidBounds]
        );
    }

    #[test]
    fn test_multiple_errors() {
        let catalog = RoomCatalog::new(vec![Room::new("P"), Room::new("P")]);
        let guests = GuestPool::new(vec![Guest::new("G1").prefers("X", 1)]);
        let errors = validate_input(&catalog, &guests, 0).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_valid_override() {
        let t = Timetable::new()
            .with_assignment("P", "G1")
            .with_assignment("OF", "G2")
            .with_assignment("OF", "G3");
        assert!(validate_override(&t, &sample_catalog(), ["G1", "G2", "G3"]).is_ok());
    }

    #[test]
    fn test_override_empty_room_entry_is_fine() {
        let mut t = Timetable::new();
        t.ensure_room("P");
        assert!(validate_override(&t, &sample_catalog(), ["G1"]).is_ok());
    }

    #[test]
    fn test_override_unknown_room() {
        let t = Timetable::new().with_assignment("DH", "G1");
        let errors = validate_override(&t, &sample_catalog(), ["G1"]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InvalidRoomReference]);
    }

    #[test]
    fn test_override_unknown_guest() {
        let t = Timetable::new().with_assignment("P", "G9");
        let errors = validate_override(&t, &sample_catalog(), ["G1"]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InvalidGuestReference]);
    }

    #[test]
    fn test_override_duplicate_guest() {
        let t = Timetable::new()
            .with_assignment("P", "G1")
            .with_assignment("C", "G1");
        let errors = validate_override(&t, &sample_catalog(), ["G1"]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::DuplicateAssignment]);
    }

    #[test]
    fn test_override_over_capacity() {
        let t = Timetable::new()
            .with_assignment("P", "G1")
            .with_assignment("P", "G2");
        let errors = validate_override(&t, &sample_catalog(), ["G1", "G2"]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::CapacityExceeded]);
    }
}
