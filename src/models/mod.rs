//! Timetabling domain models.
//!
//! Provides the data types for describing who competes for which rooms
//! and what one timeslot's answer looks like. All types are plain data,
//! immutable for the duration of a generation run.
//!
//! # Domain Mappings
//!
//! | u-timetable | Baseball lineup | Volunteer rota | Classroom |
//! |-------------|-----------------|----------------|-----------|
//! | Guest | Player | Volunteer | Student |
//! | Room | Defensive position | Station | Activity table |
//! | Timeslot | Inning | Shift | Period |
//! | Timetable | Inning lineup | Shift roster | Seating chart |

mod guest;
mod room;
mod timetable;

pub use guest::{Guest, GuestPool, RoomPreference};
pub use room::{Room, RoomCatalog};
pub use timetable::Timetable;
