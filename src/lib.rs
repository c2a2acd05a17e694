//! Resumable greedy timetabling for recurring rotations.
//!
//! Assigns guests to rooms one timeslot at a time: players to field
//! positions per inning, volunteers to stations per shift. Each timeslot
//! is either generated greedily or locked to a caller-supplied timetable,
//! and every result feeds the counters that steer the next step.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Room`, `Guest`, `RoomPreference`, `Timetable`
//! - **`constraints`**: Predicate combinators and stateful run constraints
//! - **`ordering`**: Guest priority heuristics and rule chaining
//! - **`generator`**: The resumable generator, run configuration and counters
//! - **`report`**: Fulfillment metrics over generated timetables
//! - **`validation`**: Input and override integrity checks
//!
//! # Quick start
//!
//! ```
//! use u_timetable::constraints::{has_tag, not, require};
//! use u_timetable::generator::{run_all, GenerationRequest};
//! use u_timetable::models::{Guest, Room};
//!
//! let request = GenerationRequest::new(
//!     3,
//!     vec![Room::new("P"), Room::new("C")],
//!     vec![
//!         Guest::new("ann").with_tag("injured").prefers("P", 2),
//!         Guest::new("bob").prefers("P", 2).prefers("C", 2),
//!         Guest::new("cy").prefers("C", 3),
//!     ],
//! )
//! .with_constraint(require(not(has_tag("injured"))));
//!
//! let timetables = run_all(&request).unwrap();
//! assert_eq!(timetables.len(), 3);
//! assert!(timetables.iter().all(|t| !t.contains_guest("ann")));
//! ```
//!
//! # Logging
//!
//! Emits `tracing` events; no subscriber is installed.

pub mod constraints;
pub mod error;
pub mod generator;
pub mod models;
pub mod ordering;
pub mod report;
pub mod validation;

pub use error::GeneratorError;
pub use generator::{AssignmentGenerator, GenerationRequest, GeneratorBuilder, GeneratorState};
pub use report::FulfillmentReport;
