use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{
    Aircraft, CabinCrew, Flight, FlightCabinCrew, FlightCrew, Passenger, Pilot, Seat,
};
use crate::roster::RosterAggregate;

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Repository trait for flight data access. `load_roster` returns the flat,
/// already-joined aggregate the engine works on; the engine never follows
/// live back-references.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn find_with_aircraft(&self, flight_id: Uuid) -> RepoResult<Option<(Flight, Aircraft)>>;

    async fn load_roster(&self, flight_id: Uuid) -> RepoResult<Option<RosterAggregate>>;
}

/// Repository trait for pilot data access.
#[async_trait]
pub trait PilotRepository: Send + Sync {
    async fn find(&self, pilot_id: Uuid) -> RepoResult<Option<Pilot>>;

    /// Active pilots qualified for the aircraft type whose distance limit
    /// covers `min_distance_km` and whose license is still valid.
    async fn qualified_candidates(
        &self,
        aircraft_type: &str,
        min_distance_km: f64,
    ) -> RepoResult<Vec<Pilot>>;
}

/// Repository trait for cabin crew data access.
#[async_trait]
pub trait CabinCrewRepository: Send + Sync {
    async fn find(&self, crew_id: Uuid) -> RepoResult<Option<CabinCrew>>;

    /// Active cabin crew qualified for the aircraft type.
    async fn qualified_candidates(&self, aircraft_type: &str) -> RepoResult<Vec<CabinCrew>>;
}

/// Repository trait for passenger data access.
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn find(&self, passenger_id: Uuid) -> RepoResult<Option<Passenger>>;

    /// Passengers attached to the flight who do not hold an occupied seat yet.
    async fn awaiting_seat(&self, flight_id: Uuid) -> RepoResult<Vec<Passenger>>;
}

/// Repository trait for crew assignment rows (pilots and cabin crew).
/// Deletes are idempotent: removing an absent assignment is a no-op.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn is_pilot_assigned(&self, flight_id: Uuid, pilot_id: Uuid) -> RepoResult<bool>;

    async fn save_pilot_assignment(&self, assignment: &FlightCrew) -> RepoResult<()>;

    async fn delete_pilot_assignment(&self, flight_id: Uuid, pilot_id: Uuid) -> RepoResult<()>;

    async fn is_cabin_crew_assigned(&self, flight_id: Uuid, crew_id: Uuid) -> RepoResult<bool>;

    async fn save_cabin_assignment(&self, assignment: &FlightCabinCrew) -> RepoResult<()>;

    async fn delete_cabin_assignment(&self, flight_id: Uuid, crew_id: Uuid) -> RepoResult<()>;
}

/// Repository trait for seat rows.
#[async_trait]
pub trait SeatRepository: Send + Sync {
    async fn find(&self, seat_id: Uuid) -> RepoResult<Option<Seat>>;

    async fn for_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>>;

    async fn available_for_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>>;

    async fn save(&self, seat: &Seat) -> RepoResult<()>;

    async fn save_all(&self, seats: &[Seat]) -> RepoResult<()>;
}
