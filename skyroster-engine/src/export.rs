//! Read-only roster document assembly and export.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use skyroster_core::error::{EntityKind, RosterError};
use skyroster_core::model::{CabinCrewSeniority, CabinCrewType, PilotSeniority, SeatClass};
use skyroster_core::repository::FlightRepository;
use skyroster_core::roster::{
    FlightCrewSummary, FlightRosterResponse, RosterAggregate, RosterCabinCrew, RosterPassenger,
    RosterPilot,
};
use uuid::Uuid;

pub struct RosterBuilder {
    flights: Arc<dyn FlightRepository>,
}

impl RosterBuilder {
    pub fn new(flights: Arc<dyn FlightRepository>) -> Self {
        Self { flights }
    }

    /// The complete roster document for one flight.
    pub async fn flight_roster(
        &self,
        flight_id: Uuid,
        today: NaiveDate,
    ) -> Result<FlightRosterResponse, RosterError> {
        let roster = self
            .flights
            .load_roster(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;
        Ok(build_roster_response(&roster, today))
    }

    /// The roster document serialized as indented camelCase JSON.
    pub async fn export_roster_json(
        &self,
        flight_id: Uuid,
        today: NaiveDate,
    ) -> Result<String, RosterError> {
        let roster = self.flight_roster(flight_id, today).await?;
        serde_json::to_string_pretty(&roster).map_err(|e| RosterError::Storage(Box::new(e)))
    }
}

/// Assemble the transport-neutral roster document from the flat aggregate.
pub fn build_roster_response(roster: &RosterAggregate, today: NaiveDate) -> FlightRosterResponse {
    let pilots: Vec<RosterPilot> = roster
        .active_pilots()
        .map(|assigned| RosterPilot {
            pilot_id: assigned.pilot.id,
            full_name: assigned.pilot.full_name.clone(),
            role: assigned.assignment.role.as_str().to_string(),
            seniority: assigned.pilot.seniority.as_str().to_string(),
            license_number: assigned.pilot.license_number.clone(),
            total_flight_hours: assigned.pilot.total_flight_hours,
        })
        .collect();

    let cabin_crew: Vec<RosterCabinCrew> = roster
        .active_cabin_crew()
        .map(|assigned| RosterCabinCrew {
            cabin_crew_id: assigned.crew.id,
            full_name: assigned.crew.full_name.clone(),
            crew_type: assigned.crew.crew_type.as_str().to_string(),
            seniority: assigned.crew.seniority.as_str().to_string(),
            assigned_recipe: assigned.assignment.assigned_recipe.clone(),
            languages: assigned.crew.languages.clone(),
        })
        .collect();

    let passengers: Vec<RosterPassenger> = roster
        .seats
        .iter()
        .filter_map(|occupancy| {
            let passenger = occupancy.passenger.as_ref()?;
            Some(RosterPassenger {
                passenger_id: passenger.id,
                full_name: passenger.full_name.clone(),
                age: passenger.date_of_birth.map(|dob| age_on(dob, today)),
                nationality: passenger.nationality.clone(),
                seat_number: occupancy.seat.seat_number.clone(),
                seat_class: occupancy.seat.seat_class.as_str().to_string(),
                is_infant: occupancy.seat.is_infant_seat,
                parent_name: occupancy.parent.as_ref().map(|p| p.full_name.clone()),
            })
        })
        .collect();

    let crew_summary = summarize(roster, &passengers);

    FlightRosterResponse {
        flight_id: roster.flight.id,
        flight_number: roster.flight.flight_number.clone(),
        aircraft_type: roster.aircraft.aircraft_type.clone(),
        departure_time: roster.flight.departure_time,
        departure_airport: format!(
            "{} - {}",
            roster.flight.departure_airport_code, roster.flight.departure_airport
        ),
        arrival_airport: format!(
            "{} - {}",
            roster.flight.arrival_airport_code, roster.flight.arrival_airport
        ),
        crew_summary,
        pilots,
        cabin_crew,
        passengers,
    }
}

fn summarize(roster: &RosterAggregate, passengers: &[RosterPassenger]) -> FlightCrewSummary {
    let mut summary = FlightCrewSummary::default();

    for assigned in roster.active_pilots() {
        summary.total_pilots += 1;
        match assigned.pilot.seniority {
            PilotSeniority::Senior => summary.senior_pilots += 1,
            PilotSeniority::Junior => summary.junior_pilots += 1,
            PilotSeniority::Trainee => summary.trainee_pilots += 1,
        }
    }

    for assigned in roster.active_cabin_crew() {
        summary.total_cabin_crew += 1;
        match assigned.crew.seniority {
            CabinCrewSeniority::Senior => summary.senior_cabin_crew += 1,
            CabinCrewSeniority::Junior => summary.junior_cabin_crew += 1,
        }
        if assigned.crew.crew_type == CabinCrewType::Chef {
            summary.chefs += 1;
        }
    }

    summary.total_passengers = passengers.len();
    for occupancy in &roster.seats {
        if occupancy.passenger.is_none() {
            continue;
        }
        match occupancy.seat.seat_class {
            SeatClass::Business => summary.business_passengers += 1,
            SeatClass::Economy => summary.economy_passengers += 1,
        }
        if occupancy.seat.is_infant_seat {
            summary.infants += 1;
        }
    }

    summary
}

fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}
