//! Vec-backed in-memory store and fixtures shared by the engine tests.
//! Collections keep insertion order, which the ordering-sensitive tests
//! (candidate lists, seat pairing) rely on.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use skyroster_core::model::{
    Aircraft, CabinCrew, CabinCrewSeniority, CabinCrewType, CrewRole, Flight, FlightCabinCrew,
    FlightCrew, Passenger, Pilot, PilotSeniority, Seat,
};
use skyroster_core::repository::{
    AssignmentRepository, CabinCrewRepository, FlightRepository, PassengerRepository,
    PilotRepository, RepoResult, SeatRepository,
};
use skyroster_core::roster::{CabinAssignment, PilotAssignment, RosterAggregate, SeatOccupancy};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    aircraft: Mutex<Vec<Aircraft>>,
    flights: Mutex<Vec<Flight>>,
    pilots: Mutex<Vec<Pilot>>,
    cabin_crew: Mutex<Vec<CabinCrew>>,
    passengers: Mutex<Vec<Passenger>>,
    seats: Mutex<Vec<Seat>>,
    pilot_assignments: Mutex<Vec<FlightCrew>>,
    cabin_assignments: Mutex<Vec<FlightCabinCrew>>,
    awaiting: Mutex<Vec<(Uuid, Uuid)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_aircraft(&self, aircraft: Aircraft) {
        self.aircraft.lock().unwrap().push(aircraft);
    }

    pub fn insert_flight(&self, flight: Flight) {
        self.flights.lock().unwrap().push(flight);
    }

    pub fn insert_pilot(&self, pilot: Pilot) {
        self.pilots.lock().unwrap().push(pilot);
    }

    pub fn insert_cabin_crew(&self, crew: CabinCrew) {
        self.cabin_crew.lock().unwrap().push(crew);
    }

    pub fn insert_passenger(&self, passenger: Passenger) {
        self.passengers.lock().unwrap().push(passenger);
    }

    pub fn clear_pilots(&self) {
        self.pilots.lock().unwrap().clear();
    }

    /// Mark a passenger as waiting for a seat on the flight.
    pub fn mark_awaiting(&self, flight_id: Uuid, passenger_id: Uuid) {
        self.awaiting.lock().unwrap().push((flight_id, passenger_id));
    }

    pub fn pilot_assignment_exists(&self, flight_id: Uuid, pilot_id: Uuid) -> bool {
        self.pilot_assignments
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.flight_id == flight_id && a.pilot_id == pilot_id && a.is_active)
    }

    pub fn cabin_assignment_exists(&self, flight_id: Uuid, crew_id: Uuid) -> bool {
        self.cabin_assignments
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.flight_id == flight_id && a.cabin_crew_id == crew_id && a.is_active)
    }

    pub fn pilot_role(&self, flight_id: Uuid, pilot_id: Uuid) -> Option<CrewRole> {
        self.pilot_assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.flight_id == flight_id && a.pilot_id == pilot_id && a.is_active)
            .map(|a| a.role)
    }

    pub fn assigned_pilot_count(&self, flight_id: Uuid) -> usize {
        self.pilot_assignments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.flight_id == flight_id && a.is_active)
            .count()
    }

    pub fn assigned_recipe(&self, flight_id: Uuid, crew_id: Uuid) -> Option<String> {
        self.cabin_assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.flight_id == flight_id && a.cabin_crew_id == crew_id && a.is_active)
            .and_then(|a| a.assigned_recipe.clone())
    }

    pub fn seat_by_number(&self, flight_id: Uuid, seat_number: &str) -> Option<Seat> {
        self.seats
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.flight_id == flight_id && s.seat_number == seat_number)
            .cloned()
    }

    pub fn occupied_count(&self, flight_id: Uuid) -> usize {
        self.seats
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.flight_id == flight_id && s.is_occupied)
            .count()
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn find_with_aircraft(&self, flight_id: Uuid) -> RepoResult<Option<(Flight, Aircraft)>> {
        let flights = self.flights.lock().unwrap();
        let Some(flight) = flights.iter().find(|f| f.id == flight_id).cloned() else {
            return Ok(None);
        };
        let aircraft = self
            .aircraft
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == flight.aircraft_id)
            .cloned();
        Ok(aircraft.map(|a| (flight, a)))
    }

    async fn load_roster(&self, flight_id: Uuid) -> RepoResult<Option<RosterAggregate>> {
        let Some((flight, aircraft)) = self.find_with_aircraft(flight_id).await? else {
            return Ok(None);
        };

        let pilots = {
            let roster_pilots = self.pilots.lock().unwrap();
            self.pilot_assignments
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.flight_id == flight_id)
                .filter_map(|a| {
                    let pilot = roster_pilots.iter().find(|p| p.id == a.pilot_id)?.clone();
                    Some(PilotAssignment {
                        assignment: a.clone(),
                        pilot,
                    })
                })
                .collect()
        };

        let cabin_crew = {
            let roster_crew = self.cabin_crew.lock().unwrap();
            self.cabin_assignments
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.flight_id == flight_id)
                .filter_map(|a| {
                    let crew = roster_crew.iter().find(|c| c.id == a.cabin_crew_id)?.clone();
                    Some(CabinAssignment {
                        assignment: a.clone(),
                        crew,
                    })
                })
                .collect()
        };

        let seats = {
            let passengers = self.passengers.lock().unwrap();
            let lookup = |id: Option<Uuid>| {
                id.and_then(|id| passengers.iter().find(|p| p.id == id).cloned())
            };
            self.seats
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.flight_id == flight_id)
                .map(|s| SeatOccupancy {
                    passenger: lookup(s.passenger_id),
                    parent: lookup(s.parent_passenger_id),
                    seat: s.clone(),
                })
                .collect()
        };

        Ok(Some(RosterAggregate {
            flight,
            aircraft,
            pilots,
            cabin_crew,
            seats,
        }))
    }
}

#[async_trait]
impl PilotRepository for InMemoryStore {
    async fn find(&self, pilot_id: Uuid) -> RepoResult<Option<Pilot>> {
        Ok(self
            .pilots
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == pilot_id)
            .cloned())
    }

    async fn qualified_candidates(
        &self,
        aircraft_type: &str,
        min_distance_km: f64,
    ) -> RepoResult<Vec<Pilot>> {
        Ok(self
            .pilots
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.is_active
                    && p.qualified_aircraft_types.iter().any(|t| t == aircraft_type)
                    && p.max_flight_distance_km >= min_distance_km
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CabinCrewRepository for InMemoryStore {
    async fn find(&self, crew_id: Uuid) -> RepoResult<Option<CabinCrew>> {
        Ok(self
            .cabin_crew
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == crew_id)
            .cloned())
    }

    async fn qualified_candidates(&self, aircraft_type: &str) -> RepoResult<Vec<CabinCrew>> {
        Ok(self
            .cabin_crew
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.is_active && c.qualified_aircraft_types.iter().any(|t| t == aircraft_type)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PassengerRepository for InMemoryStore {
    async fn find(&self, passenger_id: Uuid) -> RepoResult<Option<Passenger>> {
        Ok(self
            .passengers
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == passenger_id)
            .cloned())
    }

    async fn awaiting_seat(&self, flight_id: Uuid) -> RepoResult<Vec<Passenger>> {
        let seats = self.seats.lock().unwrap();
        let passengers = self.passengers.lock().unwrap();
        Ok(self
            .awaiting
            .lock()
            .unwrap()
            .iter()
            .filter(|(fid, pid)| {
                *fid == flight_id
                    && !seats.iter().any(|s| {
                        s.flight_id == flight_id && s.is_occupied && s.passenger_id == Some(*pid)
                    })
            })
            .filter_map(|(_, pid)| passengers.iter().find(|p| p.id == *pid).cloned())
            .collect())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn is_pilot_assigned(&self, flight_id: Uuid, pilot_id: Uuid) -> RepoResult<bool> {
        Ok(self.pilot_assignment_exists(flight_id, pilot_id))
    }

    async fn save_pilot_assignment(&self, assignment: &FlightCrew) -> RepoResult<()> {
        self.pilot_assignments.lock().unwrap().push(assignment.clone());
        Ok(())
    }

    async fn delete_pilot_assignment(&self, flight_id: Uuid, pilot_id: Uuid) -> RepoResult<()> {
        self.pilot_assignments
            .lock()
            .unwrap()
            .retain(|a| !(a.flight_id == flight_id && a.pilot_id == pilot_id));
        Ok(())
    }

    async fn is_cabin_crew_assigned(&self, flight_id: Uuid, crew_id: Uuid) -> RepoResult<bool> {
        Ok(self.cabin_assignment_exists(flight_id, crew_id))
    }

    async fn save_cabin_assignment(&self, assignment: &FlightCabinCrew) -> RepoResult<()> {
        self.cabin_assignments.lock().unwrap().push(assignment.clone());
        Ok(())
    }

    async fn delete_cabin_assignment(&self, flight_id: Uuid, crew_id: Uuid) -> RepoResult<()> {
        self.cabin_assignments
            .lock()
            .unwrap()
            .retain(|a| !(a.flight_id == flight_id && a.cabin_crew_id == crew_id));
        Ok(())
    }
}

#[async_trait]
impl SeatRepository for InMemoryStore {
    async fn find(&self, seat_id: Uuid) -> RepoResult<Option<Seat>> {
        Ok(self
            .seats
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == seat_id)
            .cloned())
    }

    async fn for_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
        Ok(self
            .seats
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.flight_id == flight_id)
            .cloned()
            .collect())
    }

    async fn available_for_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
        Ok(self
            .seats
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.flight_id == flight_id && !s.is_occupied)
            .cloned()
            .collect())
    }

    async fn save(&self, seat: &Seat) -> RepoResult<()> {
        let mut seats = self.seats.lock().unwrap();
        match seats.iter_mut().find(|s| s.id == seat.id) {
            Some(existing) => *existing = seat.clone(),
            None => seats.push(seat.clone()),
        }
        Ok(())
    }

    async fn save_all(&self, new_seats: &[Seat]) -> RepoResult<()> {
        self.seats.lock().unwrap().extend_from_slice(new_seats);
        Ok(())
    }
}

pub fn aircraft(business: i32, economy: i32) -> Aircraft {
    Aircraft {
        id: Uuid::new_v4(),
        aircraft_type: "Airbus A320".to_string(),
        registration_number: "TC-SKY".to_string(),
        total_seats: business + economy,
        business_class_seats: business,
        economy_class_seats: economy,
        min_crew_required: 2,
        max_crew_capacity: 4,
        min_cabin_crew_required: 5,
        max_cabin_crew_capacity: 20,
        max_range_km: 10_000.0,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn flight(aircraft: &Aircraft, distance_km: f64) -> Flight {
    let departure = Utc::now() + Duration::days(1);
    Flight {
        id: Uuid::new_v4(),
        flight_number: "SR101".to_string(),
        aircraft_id: aircraft.id,
        departure_airport: "Istanbul Airport".to_string(),
        departure_airport_code: "IST".to_string(),
        arrival_airport: "Esenboga Airport".to_string(),
        arrival_airport_code: "ESB".to_string(),
        departure_time: departure,
        arrival_time: departure + Duration::hours(4),
        distance_km,
        is_active: true,
    }
}

pub fn pilot(name: &str, seniority: PilotSeniority, hours: i32, now: DateTime<Utc>) -> Pilot {
    Pilot {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        full_name: name.to_string(),
        license_number: format!("PL-{hours}"),
        seniority,
        max_flight_distance_km: 6_000.0,
        qualified_aircraft_types: vec!["Airbus A320".to_string()],
        total_flight_hours: hours,
        license_expiry: now + Duration::days(365),
        is_active: true,
    }
}

pub fn cabin_crew(name: &str, crew_type: CabinCrewType, seniority: CabinCrewSeniority) -> CabinCrew {
    CabinCrew {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        full_name: name.to_string(),
        crew_type,
        seniority,
        qualified_aircraft_types: vec!["Airbus A320".to_string()],
        recipes: Vec::new(),
        languages: vec!["English".to_string(), "Turkish".to_string()],
        is_active: true,
    }
}

pub fn chef(name: &str, recipes: &[&str]) -> CabinCrew {
    let mut crew = cabin_crew(name, CabinCrewType::Chef, CabinCrewSeniority::Senior);
    crew.recipes = recipes.iter().map(|r| r.to_string()).collect();
    crew
}

pub fn passenger(name: &str) -> Passenger {
    Passenger {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        full_name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
        nationality: Some("TR".to_string()),
        passport_number: Some("U1234567".to_string()),
        national_id_number: None,
        is_active: true,
    }
}
