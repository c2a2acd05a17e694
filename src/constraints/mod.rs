//! Eligibility constraints.
//!
//! A constraint decides whether a guest may compete for a room in the
//! current timeslot. Constraints come in two layers:
//!
//! - **[`Predicate`]**: pure boolean rules over a guest (`has_tag`, `not`,
//!   `and`, `or`). No state.
//! - **[`Constraint`]**: a live, possibly stateful object owned by one run.
//!   `evaluate` reads its state, `commit` updates it once per assigned
//!   guest whose evaluation held.
//!
//! Runs never receive constraints directly. They receive
//! [`ConstraintInitializer`]s and instantiate fresh constraints at start,
//! so counters cannot leak from one run into the next.
//!
//! # Usage
//!
//! ```
//! use u_timetable::constraints::{at_most, has_tag, not, Constraint, ConstraintInitializer};
//!
//! // At most two veterans ever get a room, across the whole run.
//! let spec = at_most(2, has_tag("veteran"));
//! let live = spec.instantiate();
//! assert_eq!(live.description(), "AT MOST 2 WHERE has tag \"veteran\"");
//!
//! let rookies_only = not(has_tag("veteran"));
//! assert_eq!(rookies_only.describe(), "NOT (has tag \"veteran\")");
//! ```

mod predicate;

pub use predicate::{always, and, has_tag, not, or, Predicate};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::Guest;

/// A live constraint instance owned by a single run.
///
/// `evaluate` and `commit` must operate on the same private state:
/// a constraint whose answer depends on how often it has been
/// satisfied reads the very counter `commit` writes.
pub trait Constraint: Send + Debug {
    /// Whether the guest is eligible under the current state.
    fn evaluate(&self, guest: &Guest) -> bool;

    /// Records that `guest` passed `evaluate` and received a room.
    fn commit(&mut self, guest: &Guest);

    /// Human-readable description for diagnostics.
    fn description(&self) -> String;
}

/// Produces a fresh [`Constraint`] for each run.
pub trait ConstraintInitializer: Send + Sync {
    /// Creates a new constraint with zeroed state.
    fn instantiate(&self) -> Box<dyn Constraint>;
}

impl<F> ConstraintInitializer for F
where
    F: Fn() -> Box<dyn Constraint> + Send + Sync,
{
    fn instantiate(&self) -> Box<dyn Constraint> {
        self()
    }
}

/// Declarative constraint initializer.
///
/// Serializable, so a constraint library can be stored next to the roster
/// it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintSpec {
    /// Only guests matching the predicate are eligible.
    Require(Predicate),

    /// Eligible while fewer than `max` assigned guests have satisfied
    /// this constraint, and the predicate holds.
    ///
    /// The counter is cumulative over all timeslots of a run.
    AtMost { max: u32, predicate: Predicate },
}

impl ConstraintSpec {
    /// Human-readable description.
    pub fn describe(&self) -> String {
        match self {
            Self::Require(p) => format!("REQUIRE {}", p.describe()),
            Self::AtMost { max, predicate } => {
                format!("AT MOST {max} WHERE {}", predicate.describe())
            }
        }
    }
}

impl ConstraintInitializer for ConstraintSpec {
    fn instantiate(&self) -> Box<dyn Constraint> {
        match self {
            Self::Require(p) => Box::new(Require::new(p.clone())),
            Self::AtMost { max, predicate } => Box::new(AtMost::new(*max, predicate.clone())),
        }
    }
}

/// Caps how many assigned guests may satisfy a predicate over a run.
///
/// Guests not matching the predicate are never eligible under this
/// constraint.
pub fn at_most(max: u32, predicate: Predicate) -> ConstraintSpec {
    ConstraintSpec::AtMost { max, predicate }
}

/// Restricts eligibility to guests matching a predicate.
pub fn require(predicate: Predicate) -> ConstraintSpec {
    ConstraintSpec::Require(predicate)
}

/// Live counting constraint created from [`ConstraintSpec::AtMost`].
#[derive(Debug, Clone)]
pub struct AtMost {
    max: u32,
    predicate: Predicate,
    count: u32,
}

impl AtMost {
    /// Creates a constraint with its counter at zero.
    pub fn new(max: u32, predicate: Predicate) -> Self {
        Self {
            max,
            predicate,
            count: 0,
        }
    }

    /// How many times the constraint has been satisfied.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Constraint for AtMost {
    fn evaluate(&self, guest: &Guest) -> bool {
        self.count < self.max && self.predicate.evaluate(guest)
    }

    fn commit(&mut self, _guest: &Guest) {
        self.count += 1;
    }

    fn description(&self) -> String {
        format!("AT MOST {} WHERE {}", self.max, self.predicate.describe())
    }
}

/// Live stateless constraint created from [`ConstraintSpec::Require`].
#[derive(Debug, Clone)]
pub struct Require {
    predicate: Predicate,
}

impl Require {
    /// Wraps a predicate.
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }
}

impl Constraint for Require {
    fn evaluate(&self, guest: &Guest) -> bool {
        self.predicate.evaluate(guest)
    }

    fn commit(&mut self, _guest: &Guest) {}

    fn description(&self) -> String {
        format!("REQUIRE {}", self.predicate.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_counts_commits() {
        let mut c = AtMost::new(2, has_tag("veteran"));
        let vet = Guest::new("G1").with_tag("veteran");
        let rookie = Guest::new("G2");

        assert!(c.evaluate(&vet));
        assert!(!c.evaluate(&rookie));

        c.commit(&vet);
        assert!(c.evaluate(&vet));
        c.commit(&vet);
        assert_eq!(c.count(), 2);
        assert!(!c.evaluate(&vet));
    }

    #[test]
    fn test_at_most_zero_blocks_everyone() {
        let c = AtMost::new(0, always());
        assert!(!c.evaluate(&Guest::new("G1")));
    }

    #[test]
    fn test_instantiate_is_fresh() {
        let spec = at_most(1, always());
        let g = Guest::new("G1");

        let mut first = spec.instantiate();
        first.commit(&g);
        assert!(!first.evaluate(&g));

        let second = spec.instantiate();
        assert!(second.evaluate(&g));
    }

    #[test]
    fn test_require() {
        let spec = require(not(has_tag("injured")));
        let mut c = spec.instantiate();
        let healthy = Guest::new("G1");
        let injured = Guest::new("G2").with_tag("injured");

        assert!(c.evaluate(&healthy));
        assert!(!c.evaluate(&injured));
        c.commit(&healthy);
        assert!(c.evaluate(&healthy));
    }

    #[test]
    fn test_descriptions() {
        let spec = at_most(2, has_tag("veteran"));
        assert_eq!(spec.describe(), "AT MOST 2 WHERE has tag \"veteran\"");
        assert_eq!(spec.instantiate().description(), spec.describe());

        let spec = require(has_tag("catcher"));
        assert_eq!(spec.describe(), "REQUIRE has tag \"catcher\"");
        assert_eq!(spec.instantiate().description(), spec.describe());
    }

    #[derive(Debug, Default)]
    struct OncePerGuest {
        seen: Vec<String>,
    }

    impl Constraint for OncePerGuest {
        fn evaluate(&self, guest: &Guest) -> bool {
            !self.seen.contains(&guest.id)
        }

        fn commit(&mut self, guest: &Guest) {
            self.seen.push(guest.id.clone());
        }

        fn description(&self) -> String {
            "ONCE PER GUEST".into()
        }
    }

    #[test]
    fn test_closure_initializer() {
        let init = || Box::new(OncePerGuest::default()) as Box<dyn Constraint>;
        let mut c = init.instantiate();
        let g = Guest::new("G1");

        assert!(c.evaluate(&g));
        c.commit(&g);
        assert!(!c.evaluate(&g));
        assert!(c.evaluate(&Guest::new("G2")));
    }

    #[test]
    fn test_spec_json() {
        let json = r#"{"at_most":{"max":1,"predicate":{"has_tag":"veteran"}}}"#;
        let spec: ConstraintSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, at_most(1, has_tag("veteran")));
    }
}
