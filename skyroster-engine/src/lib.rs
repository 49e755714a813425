pub mod crew;
pub mod export;
pub mod layout;
pub mod locks;
pub mod qualification;
pub mod recipe;
pub mod seats;
pub mod validator;

#[cfg(test)]
pub(crate) mod testutil;

pub use crew::CrewAssignmentEngine;
pub use export::RosterBuilder;
pub use locks::FlightLocks;
pub use recipe::{RandomRecipeSelector, RecipeSelector};
pub use seats::SeatAssignmentEngine;
