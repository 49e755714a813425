pub mod app_config;
pub mod assignment_repo;
pub mod cabin_crew_repo;
pub mod database;
pub mod flight_repo;
pub mod passenger_repo;
pub mod pilot_repo;
pub mod rows;
pub mod seat_repo;

pub use app_config::Config;
pub use assignment_repo::PostgresAssignmentRepository;
pub use cabin_crew_repo::PostgresCabinCrewRepository;
pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use passenger_repo::PostgresPassengerRepository;
pub use pilot_repo::PostgresPilotRepository;
pub use seat_repo::PostgresSeatRepository;
