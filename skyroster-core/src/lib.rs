pub mod error;
pub mod model;
pub mod repository;
pub mod roster;

pub use error::{ErrorKind, RosterError};
pub use model::{
    Aircraft, CabinCrew, CabinCrewSeniority, CabinCrewType, CrewRole, Flight, FlightCabinCrew,
    FlightCrew, Passenger, Pilot, PilotSeniority, Seat, SeatClass,
};
pub use roster::RosterAggregate;
