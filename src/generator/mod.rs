//! Resumable greedy timetable generator.
//!
//! # Algorithm
//!
//! Each call to [`AssignmentGenerator::advance`] resolves one timeslot:
//!
//! 1. With an override, copy it in as the timeslot's timetable (locked).
//!    Without one, start from an empty timetable and greedily fill it:
//!    sort guests by the ordering heuristic; for each guest that passes
//!    every constraint, pick the preferred room with the least headroom
//!    left (`max_desired - assigned`) that still has space.
//! 2. Settle: for every seated guest, commit the constraints that hold for
//!    them and bump their cumulative counters. Settlement runs for locked
//!    timeslots too, so later greedy steps see truthful counters.
//! 3. Yield a copy of the timetable.
//!
//! Single pass, no backtracking. Guests left without a room are normal
//! output, not errors.
//!
//! # Complexity
//! O(g log g + g * (c + p)) per timeslot where g=guests, c=constraints,
//! p=preferences per guest.
//!
//! # Example
//!
//! ```
//! use u_timetable::generator::GeneratorBuilder;
//! use u_timetable::models::{Guest, Room, RoomCatalog, Timetable};
//!
//! let catalog = RoomCatalog::new(vec![Room::new("P"), Room::new("C")]);
//! let guests = vec![
//!     Guest::new("ann").prefers("P", 3).prefers("C", 3),
//!     Guest::new("bob").prefers("C", 3),
//! ];
//!
//! let mut generator = GeneratorBuilder::new(2, catalog)
//!     .with_guests(guests)
//!     .start()
//!     .unwrap();
//!
//! // Inning 1 was decided by hand.
//! let locked = Timetable::new().with_assignment("C", "ann");
//! let first = generator.advance(Some(&locked)).unwrap().unwrap();
//! assert_eq!(first.guests_in("C"), ["ann".to_string()]);
//!
//! // Inning 2 is generated around it.
//! let second = generator.advance(None).unwrap().unwrap();
//! assert_eq!(second.guests_in("C"), ["bob".to_string()]);
//! assert!(generator.advance(None).unwrap().is_none());
//! ```

mod request;
mod run;

pub use request::GenerationRequest;
pub use run::{PreferenceProgress, RunGuest};

use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

use crate::constraints::{Constraint, ConstraintInitializer};
use crate::error::GeneratorError;
use crate::models::{GuestPool, RoomCatalog, Timetable};
use crate::ordering::{rules::FewestTimeslots, sort_indices, GuestOrdering};
use crate::validation::{validate_input, validate_override};

/// Lifecycle of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Started, no timeslot processed yet.
    Configured,
    /// Between timeslots, waiting for the next `advance`.
    AwaitingResume,
    /// Every timeslot has been yielded.
    Terminal,
    /// A step failed with a configuration error.
    Faulted,
}

/// Configures and starts a generation run.
///
/// Rooms and timeslot count first, then guests, constraints and an
/// optional ordering heuristic (default: [`FewestTimeslots`]).
pub struct GeneratorBuilder {
    timeslots: usize,
    catalog: RoomCatalog,
    guests: GuestPool,
    constraints: Vec<Box<dyn ConstraintInitializer>>,
    ordering: Option<Box<dyn GuestOrdering>>,
}

impl GeneratorBuilder {
    /// Creates a builder for `timeslots` timeslots over `catalog`.
    pub fn new(timeslots: usize, catalog: impl Into<RoomCatalog>) -> Self {
        Self {
            timeslots,
            catalog: catalog.into(),
            guests: GuestPool::default(),
            constraints: Vec::new(),
            ordering: None,
        }
    }

    /// Creates a builder from a declarative request.
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self::new(request.timeslots, request.rooms.clone())
            .with_guests(request.guests.clone())
            .with_constraints(request.constraints.iter().cloned())
    }

    /// Sets the guest pool.
    pub fn with_guests(mut self, guests: impl Into<GuestPool>) -> Self {
        self.guests = guests.into();
        self
    }

    /// Adds a constraint initializer.
    ///
    /// Any `Fn() -> Box<dyn Constraint>` closure is an initializer too.
    pub fn with_constraint<C: ConstraintInitializer + 'static>(mut self, constraint: C) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Adds several constraint initializers.
    pub fn with_constraints<C, I>(mut self, constraints: I) -> Self
    where
        C: ConstraintInitializer + 'static,
        I: IntoIterator<Item = C>,
    {
        for c in constraints {
            self.constraints.push(Box::new(c));
        }
        self
    }

    /// Replaces the default ordering heuristic.
    pub fn with_ordering<O: GuestOrdering + 'static>(mut self, ordering: O) -> Self {
        self.ordering = Some(Box::new(ordering));
        self
    }

    /// Validates the inputs and starts the run.
    ///
    /// Constraints are instantiated here, so every run starts with fresh
    /// counters.
    pub fn start(self) -> Result<AssignmentGenerator, GeneratorError> {
        if let Err(errors) = validate_input(&self.catalog, &self.guests, self.timeslots) {
            warn!(errors = errors.len(), "rejected generation run configuration");
            return Err(errors.into());
        }

        let guests: Vec<RunGuest> = self
            .guests
            .guests()
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, g)| RunGuest::new(g, i))
            .collect();
        let index = guests
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id().to_string(), i))
            .collect();
        let constraints = self.constraints.iter().map(|c| c.instantiate()).collect();
        let mut ordering: Box<dyn GuestOrdering> = match self.ordering {
            Some(ordering) => ordering,
            None => Box::new(FewestTimeslots),
        };
        ordering.prepare(&guests);

        info!(
            timeslots = self.timeslots,
            rooms = self.catalog.len(),
            guests = guests.len(),
            constraints = self.constraints.len(),
            ordering = ordering.name(),
            "generation run started"
        );

        Ok(AssignmentGenerator {
            working: Timetable::empty_for(&self.catalog),
            catalog: self.catalog,
            guests,
            index,
            constraints,
            ordering,
            timeslots: self.timeslots,
            processed: 0,
            state: GeneratorState::Configured,
            fault_yielded: false,
        })
    }
}

impl std::fmt::Debug for GeneratorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorBuilder")
            .field("timeslots", &self.timeslots)
            .field("rooms", &self.catalog.len())
            .field("guests", &self.guests.len())
            .field("constraints", &self.constraints.len())
            .field("ordering", &self.ordering)
            .finish()
    }
}

/// A live generation run.
///
/// Owns the working timetable, run-scoped guest counters and
/// instantiated constraints. Nothing inside is handed out by mutable
/// reference; callers get copies.
#[derive(Debug)]
pub struct AssignmentGenerator {
    catalog: RoomCatalog,
    guests: Vec<RunGuest>,
    index: HashMap<String, usize>,
    constraints: Vec<Box<dyn Constraint>>,
    ordering: Box<dyn GuestOrdering>,
    timeslots: usize,
    processed: usize,
    state: GeneratorState,
    working: Timetable,
    fault_yielded: bool,
}

impl AssignmentGenerator {
    /// Resolves the next timeslot.
    ///
    /// With `locked`, that timetable is taken as the timeslot's answer
    /// (after validation) instead of generating one. Either way run
    /// counters are updated from the result.
    ///
    /// Returns `Ok(None)` once every timeslot has been yielded. A
    /// configuration error aborts the step and faults the generator.
    pub fn advance(&mut self, locked: Option<&Timetable>) -> Result<Option<Timetable>, GeneratorError> {
        match self.state {
            GeneratorState::Terminal => return Ok(None),
            GeneratorState::Faulted => return Err(GeneratorError::Faulted),
            GeneratorState::Configured | GeneratorState::AwaitingResume => {}
        }

        let timeslot = self.processed;
        match locked {
            Some(timetable) => {
                let checked = validate_override(
                    timetable,
                    &self.catalog,
                    self.guests.iter().map(RunGuest::id),
                );
                if let Err(errors) = checked {
                    warn!(timeslot, errors = errors.len(), "rejected locked timetable");
                    self.state = GeneratorState::Faulted;
                    return Err(errors.into());
                }
                self.working = self.absorb(timetable);
                debug!(
                    timeslot,
                    assigned = self.working.assignment_count(),
                    "absorbed locked timeslot"
                );
            }
            None => {
                self.working = Timetable::empty_for(&self.catalog);
                self.fill();
                debug!(
                    timeslot,
                    assigned = self.working.assignment_count(),
                    unassigned = self.guests.len() - self.working.assignment_count(),
                    "generated timeslot"
                );
            }
        }

        self.settle();
        self.processed += 1;

        if self.processed >= self.timeslots {
            self.state = GeneratorState::Terminal;
            info!(timeslots = self.processed, "generation run finished");
        } else {
            self.state = GeneratorState::AwaitingResume;
        }

        Ok(Some(self.working.clone()))
    }

    /// Copies a locked timetable, adding empty lists for omitted rooms.
    fn absorb(&self, locked: &Timetable) -> Timetable {
        let mut working = locked.clone();
        for room_id in self.catalog.ids() {
            working.ensure_room(room_id);
        }
        working
    }

    /// Greedy fill of the working timetable.
    fn fill(&mut self) {
        let order = sort_indices(self.ordering.as_ref(), &self.guests);

        for idx in order {
            let guest = &self.guests[idx];

            let unsatisfied = self
                .constraints
                .iter()
                .filter(|c| !c.evaluate(guest.guest()))
                .count();
            if unsatisfied > 0 {
                trace!(guest = guest.id(), unsatisfied, "guest blocked by constraints");
                continue;
            }

            let working = &self.working;
            let catalog = &self.catalog;
            let choice = guest
                .preferences()
                .iter()
                .filter(|p| !p.is_exhausted())
                .filter(|p| {
                    catalog
                        .get(p.room_id())
                        .is_some_and(|room| room.has_space(working.occupancy(p.room_id())))
                })
                .min_by_key(|p| p.headroom());

            match choice {
                Some(p) => {
                    let room_id = p.room_id().to_string();
                    trace!(guest = guest.id(), room = %room_id, "assigned");
                    self.working.assign(room_id, guest.id());
                }
                None => trace!(guest = guest.id(), "no candidate room"),
            }
        }
    }

    /// Commits constraints and counters for every seated guest.
    ///
    /// Each guest's constraints are all evaluated before any is committed;
    /// commits from earlier guests are visible to later ones.
    fn settle(&mut self) {
        for room in self.catalog.rooms() {
            for guest_id in self.working.guests_in(&room.id) {
                let Some(&idx) = self.index.get(guest_id) else {
                    continue;
                };
                let guest = &mut self.guests[idx];

                let satisfied: Vec<usize> = self
                    .constraints
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.evaluate(guest.guest()))
                    .map(|(i, _)| i)
                    .collect();
                for i in satisfied {
                    self.constraints[i].commit(guest.guest());
                }

                guest.record_assignment(&room.id);
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Total timeslots in the run.
    pub fn timeslots(&self) -> usize {
        self.timeslots
    }

    /// Timeslots processed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Timeslots still to be yielded.
    pub fn remaining(&self) -> usize {
        self.timeslots.saturating_sub(self.processed)
    }

    /// Snapshot of one guest's run counters.
    pub fn guest(&self, id: &str) -> Option<RunGuest> {
        self.index.get(id).map(|&i| self.guests[i].clone())
    }

    /// Snapshot of all run counters, in registration order.
    pub fn guests(&self) -> Vec<RunGuest> {
        self.guests.clone()
    }

    /// Descriptions of the live constraints.
    pub fn constraint_descriptions(&self) -> Vec<String> {
        self.constraints.iter().map(|c| c.description()).collect()
    }

    /// Name of the active ordering heuristic.
    pub fn ordering_name(&self) -> &'static str {
        self.ordering.name()
    }
}

impl Iterator for AssignmentGenerator {
    type Item = Result<Timetable, GeneratorError>;

    /// Generates the next timeslot without an override.
    ///
    /// A faulted generator yields `Err(Faulted)` once, then ends.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == GeneratorState::Faulted {
            if self.fault_yielded {
                return None;
            }
            self.fault_yielded = true;
            return Some(Err(GeneratorError::Faulted));
        }
        self.advance(None).transpose()
    }
}

/// Generates every timeslot of a request without overrides.
pub fn run_all(request: &GenerationRequest) -> Result<Vec<Timetable>, GeneratorError> {
    GeneratorBuilder::from_request(request).start()?.collect()
}
