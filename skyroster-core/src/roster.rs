use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Aircraft, CabinCrew, Flight, FlightCabinCrew, FlightCrew, Passenger, Pilot, Seat};

/// Flat flight aggregate assembled by the persistence layer: the flight, its
/// aircraft, and the joined assignment/seat rows with their people. This is
/// the engine's working snapshot; there are no cyclic references to chase.
#[derive(Debug, Clone)]
pub struct RosterAggregate {
    pub flight: Flight,
    pub aircraft: Aircraft,
    pub pilots: Vec<PilotAssignment>,
    pub cabin_crew: Vec<CabinAssignment>,
    pub seats: Vec<SeatOccupancy>,
}

#[derive(Debug, Clone)]
pub struct PilotAssignment {
    pub assignment: FlightCrew,
    pub pilot: Pilot,
}

#[derive(Debug, Clone)]
pub struct CabinAssignment {
    pub assignment: FlightCabinCrew,
    pub crew: CabinCrew,
}

#[derive(Debug, Clone)]
pub struct SeatOccupancy {
    pub seat: Seat,
    pub passenger: Option<Passenger>,
    pub parent: Option<Passenger>,
}

impl RosterAggregate {
    pub fn active_pilots(&self) -> impl Iterator<Item = &PilotAssignment> {
        self.pilots.iter().filter(|p| p.assignment.is_active)
    }

    pub fn active_cabin_crew(&self) -> impl Iterator<Item = &CabinAssignment> {
        self.cabin_crew.iter().filter(|c| c.assignment.is_active)
    }
}

/// Transport-neutral roster document; serialized with camelCase names so the
/// exported JSON matches the established roster format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRosterResponse {
    pub flight_id: Uuid,
    pub flight_number: String,
    pub aircraft_type: String,
    pub departure_time: DateTime<Utc>,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub crew_summary: FlightCrewSummary,
    pub pilots: Vec<RosterPilot>,
    pub cabin_crew: Vec<RosterCabinCrew>,
    pub passengers: Vec<RosterPassenger>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightCrewSummary {
    pub total_pilots: usize,
    pub senior_pilots: usize,
    pub junior_pilots: usize,
    pub trainee_pilots: usize,
    pub total_cabin_crew: usize,
    pub senior_cabin_crew: usize,
    pub junior_cabin_crew: usize,
    pub chefs: usize,
    pub total_passengers: usize,
    pub business_passengers: usize,
    pub economy_passengers: usize,
    pub infants: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPilot {
    pub pilot_id: Uuid,
    pub full_name: String,
    pub role: String,
    pub seniority: String,
    pub license_number: String,
    pub total_flight_hours: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterCabinCrew {
    pub cabin_crew_id: Uuid,
    pub full_name: String,
    pub crew_type: String,
    pub seniority: String,
    pub assigned_recipe: Option<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPassenger {
    pub passenger_id: Uuid,
    pub full_name: String,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub seat_number: String,
    pub seat_class: String,
    pub is_infant: bool,
    pub parent_name: Option<String>,
}

/// Seat map of one flight with availability counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapResponse {
    pub flight_id: Uuid,
    pub flight_number: String,
    pub aircraft_type: String,
    pub total_seats: i32,
    pub available_seats: usize,
    pub occupied_seats: usize,
    pub seats: Vec<SeatStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStatus {
    pub seat_id: Uuid,
    pub seat_number: String,
    pub seat_class: String,
    pub is_occupied: bool,
    pub is_infant_seat: bool,
    pub passenger_id: Option<Uuid>,
    pub passenger_name: Option<String>,
    pub parent_passenger_id: Option<Uuid>,
}
