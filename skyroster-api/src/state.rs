use std::sync::Arc;

use skyroster_core::repository::{
    AssignmentRepository, CabinCrewRepository, FlightRepository, PassengerRepository,
    PilotRepository, SeatRepository,
};
use skyroster_engine::{
    CrewAssignmentEngine, FlightLocks, RandomRecipeSelector, RosterBuilder, SeatAssignmentEngine,
};
use skyroster_store::{
    DbClient, PostgresAssignmentRepository, PostgresCabinCrewRepository, PostgresFlightRepository,
    PostgresPassengerRepository, PostgresPilotRepository, PostgresSeatRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub crew: Arc<CrewAssignmentEngine>,
    pub seats: Arc<SeatAssignmentEngine>,
    pub roster: Arc<RosterBuilder>,
}

impl AppState {
    pub fn new(db: &DbClient) -> Self {
        let pool = db.pool.clone();

        let flights: Arc<dyn FlightRepository> =
            Arc::new(PostgresFlightRepository { pool: pool.clone() });
        let pilots: Arc<dyn PilotRepository> =
            Arc::new(PostgresPilotRepository { pool: pool.clone() });
        let cabin_crew: Arc<dyn CabinCrewRepository> =
            Arc::new(PostgresCabinCrewRepository { pool: pool.clone() });
        let passengers: Arc<dyn PassengerRepository> =
            Arc::new(PostgresPassengerRepository { pool: pool.clone() });
        let assignments: Arc<dyn AssignmentRepository> =
            Arc::new(PostgresAssignmentRepository { pool: pool.clone() });
        let seats: Arc<dyn SeatRepository> = Arc::new(PostgresSeatRepository { pool });

        // one lock registry shared by both engines; crew and seat mutations
        // on the same flight serialize against each other
        let locks = Arc::new(FlightLocks::new());

        Self {
            crew: Arc::new(CrewAssignmentEngine::new(
                flights.clone(),
                pilots,
                cabin_crew,
                assignments,
                locks.clone(),
                Arc::new(RandomRecipeSelector),
            )),
            seats: Arc::new(SeatAssignmentEngine::new(
                flights.clone(),
                passengers,
                seats,
                locks,
            )),
            roster: Arc::new(RosterBuilder::new(flights)),
        }
    }
}
