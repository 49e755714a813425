//! Row structs mapped from SQL results and their conversions into the core
//! models. List-valued columns (qualified aircraft types, recipes, languages)
//! are stored as comma-separated text.

use chrono::{DateTime, NaiveDate, Utc};
use skyroster_core::model::{
    Aircraft, CabinCrew, CabinCrewSeniority, CabinCrewType, CrewRole, Flight, FlightCabinCrew,
    FlightCrew, Passenger, Pilot, PilotSeniority, Seat, SeatClass,
};
use skyroster_core::roster::{CabinAssignment, PilotAssignment, SeatOccupancy};
use sqlx::FromRow;
use uuid::Uuid;

pub type RowError = Box<dyn std::error::Error + Send + Sync>;

pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(",")
}

#[derive(Debug, FromRow)]
pub struct AircraftRow {
    pub id: Uuid,
    pub aircraft_type: String,
    pub registration_number: String,
    pub total_seats: i32,
    pub business_class_seats: i32,
    pub economy_class_seats: i32,
    pub min_crew_required: i32,
    pub max_crew_capacity: i32,
    pub min_cabin_crew_required: i32,
    pub max_cabin_crew_capacity: i32,
    pub max_range_km: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AircraftRow> for Aircraft {
    fn from(row: AircraftRow) -> Self {
        Aircraft {
            id: row.id,
            aircraft_type: row.aircraft_type,
            registration_number: row.registration_number,
            total_seats: row.total_seats,
            business_class_seats: row.business_class_seats,
            economy_class_seats: row.economy_class_seats,
            min_crew_required: row.min_crew_required,
            max_crew_capacity: row.max_crew_capacity,
            min_cabin_crew_required: row.min_cabin_crew_required,
            max_cabin_crew_capacity: row.max_cabin_crew_capacity,
            max_range_km: row.max_range_km,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct FlightRow {
    pub id: Uuid,
    pub flight_number: String,
    pub aircraft_id: Uuid,
    pub departure_airport: String,
    pub departure_airport_code: String,
    pub arrival_airport: String,
    pub arrival_airport_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub distance_km: f64,
    pub is_active: bool,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            aircraft_id: row.aircraft_id,
            departure_airport: row.departure_airport,
            departure_airport_code: row.departure_airport_code,
            arrival_airport: row.arrival_airport,
            arrival_airport_code: row.arrival_airport_code,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            distance_km: row.distance_km,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PilotRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub license_number: String,
    pub seniority: String,
    pub max_flight_distance_km: f64,
    pub qualified_aircraft_types: String,
    pub total_flight_hours: i32,
    pub license_expiry: DateTime<Utc>,
    pub is_active: bool,
}

impl TryFrom<PilotRow> for Pilot {
    type Error = RowError;

    fn try_from(row: PilotRow) -> Result<Self, Self::Error> {
        Ok(Pilot {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            license_number: row.license_number,
            seniority: row.seniority.parse::<PilotSeniority>()?,
            max_flight_distance_km: row.max_flight_distance_km,
            qualified_aircraft_types: split_list(&row.qualified_aircraft_types),
            total_flight_hours: row.total_flight_hours,
            license_expiry: row.license_expiry,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct CabinCrewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub crew_type: String,
    pub seniority: String,
    pub qualified_aircraft_types: String,
    pub recipes: String,
    pub languages: String,
    pub is_active: bool,
}

impl TryFrom<CabinCrewRow> for CabinCrew {
    type Error = RowError;

    fn try_from(row: CabinCrewRow) -> Result<Self, Self::Error> {
        Ok(CabinCrew {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            crew_type: row.crew_type.parse::<CabinCrewType>()?,
            seniority: row.seniority.parse::<CabinCrewSeniority>()?,
            qualified_aircraft_types: split_list(&row.qualified_aircraft_types),
            recipes: split_list(&row.recipes),
            languages: split_list(&row.languages),
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct PassengerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub national_id_number: Option<String>,
    pub is_active: bool,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            date_of_birth: row.date_of_birth,
            nationality: row.nationality,
            passport_number: row.passport_number,
            national_id_number: row.national_id_number,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SeatRow {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub seat_class: String,
    pub passenger_id: Option<Uuid>,
    pub is_infant_seat: bool,
    pub parent_passenger_id: Option<Uuid>,
    pub is_occupied: bool,
    pub booked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SeatRow> for Seat {
    type Error = RowError;

    fn try_from(row: SeatRow) -> Result<Self, Self::Error> {
        Ok(Seat {
            id: row.id,
            flight_id: row.flight_id,
            seat_number: row.seat_number,
            seat_class: row.seat_class.parse::<SeatClass>()?,
            passenger_id: row.passenger_id,
            is_infant_seat: row.is_infant_seat,
            parent_passenger_id: row.parent_passenger_id,
            is_occupied: row.is_occupied,
            booked_at: row.booked_at,
            created_at: row.created_at,
        })
    }
}

/// Pilot assignment row joined with its pilot; pilot columns are aliased
/// with a `pilot_` prefix in the query.
#[derive(Debug, FromRow)]
pub struct PilotAssignmentJoinRow {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub pilot_id: Uuid,
    pub role: String,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
    pub pilot_user_id: Uuid,
    pub pilot_full_name: String,
    pub pilot_license_number: String,
    pub pilot_seniority: String,
    pub pilot_max_flight_distance_km: f64,
    pub pilot_qualified_aircraft_types: String,
    pub pilot_total_flight_hours: i32,
    pub pilot_license_expiry: DateTime<Utc>,
    pub pilot_is_active: bool,
}

impl TryFrom<PilotAssignmentJoinRow> for PilotAssignment {
    type Error = RowError;

    fn try_from(row: PilotAssignmentJoinRow) -> Result<Self, Self::Error> {
        Ok(PilotAssignment {
            assignment: FlightCrew {
                id: row.id,
                flight_id: row.flight_id,
                pilot_id: row.pilot_id,
                role: row.role.parse::<CrewRole>()?,
                assigned_at: row.assigned_at,
                is_active: row.is_active,
            },
            pilot: Pilot {
                id: row.pilot_id,
                user_id: row.pilot_user_id,
                full_name: row.pilot_full_name,
                license_number: row.pilot_license_number,
                seniority: row.pilot_seniority.parse::<PilotSeniority>()?,
                max_flight_distance_km: row.pilot_max_flight_distance_km,
                qualified_aircraft_types: split_list(&row.pilot_qualified_aircraft_types),
                total_flight_hours: row.pilot_total_flight_hours,
                license_expiry: row.pilot_license_expiry,
                is_active: row.pilot_is_active,
            },
        })
    }
}

/// Cabin crew assignment row joined with its crew member; crew columns are
/// aliased with a `crew_` prefix.
#[derive(Debug, FromRow)]
pub struct CabinAssignmentJoinRow {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub cabin_crew_id: Uuid,
    pub assigned_recipe: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
    pub crew_user_id: Uuid,
    pub crew_full_name: String,
    pub crew_type: String,
    pub crew_seniority: String,
    pub crew_qualified_aircraft_types: String,
    pub crew_recipes: String,
    pub crew_languages: String,
    pub crew_is_active: bool,
}

impl TryFrom<CabinAssignmentJoinRow> for CabinAssignment {
    type Error = RowError;

    fn try_from(row: CabinAssignmentJoinRow) -> Result<Self, Self::Error> {
        Ok(CabinAssignment {
            assignment: FlightCabinCrew {
                id: row.id,
                flight_id: row.flight_id,
                cabin_crew_id: row.cabin_crew_id,
                assigned_recipe: row.assigned_recipe,
                assigned_at: row.assigned_at,
                is_active: row.is_active,
            },
            crew: CabinCrew {
                id: row.cabin_crew_id,
                user_id: row.crew_user_id,
                full_name: row.crew_full_name,
                crew_type: row.crew_type.parse::<CabinCrewType>()?,
                seniority: row.crew_seniority.parse::<CabinCrewSeniority>()?,
                qualified_aircraft_types: split_list(&row.crew_qualified_aircraft_types),
                recipes: split_list(&row.crew_recipes),
                languages: split_list(&row.crew_languages),
                is_active: row.crew_is_active,
            },
        })
    }
}

/// Seat row left-joined with its passenger and the infant's parent; joined
/// columns are aliased with `passenger_` / `parent_` prefixes and are null
/// for free seats. `passenger_user_id` / `parent_user_id` double as the
/// presence markers since the underlying columns are non-null.
#[derive(Debug, FromRow)]
pub struct SeatOccupancyRow {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub seat_class: String,
    pub passenger_id: Option<Uuid>,
    pub is_infant_seat: bool,
    pub parent_passenger_id: Option<Uuid>,
    pub is_occupied: bool,
    pub booked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub passenger_user_id: Option<Uuid>,
    pub passenger_full_name: Option<String>,
    pub passenger_date_of_birth: Option<NaiveDate>,
    pub passenger_nationality: Option<String>,
    pub passenger_passport_number: Option<String>,
    pub passenger_national_id_number: Option<String>,
    pub passenger_is_active: Option<bool>,
    pub parent_user_id: Option<Uuid>,
    pub parent_full_name: Option<String>,
    pub parent_date_of_birth: Option<NaiveDate>,
    pub parent_nationality: Option<String>,
    pub parent_passport_number: Option<String>,
    pub parent_national_id_number: Option<String>,
    pub parent_is_active: Option<bool>,
}

impl TryFrom<SeatOccupancyRow> for SeatOccupancy {
    type Error = RowError;

    fn try_from(row: SeatOccupancyRow) -> Result<Self, Self::Error> {
        let passenger = match (row.passenger_id, row.passenger_user_id) {
            (Some(id), Some(user_id)) => Some(Passenger {
                id,
                user_id,
                full_name: row.passenger_full_name.unwrap_or_default(),
                date_of_birth: row.passenger_date_of_birth,
                nationality: row.passenger_nationality,
                passport_number: row.passenger_passport_number,
                national_id_number: row.passenger_national_id_number,
                is_active: row.passenger_is_active.unwrap_or(false),
            }),
            _ => None,
        };
        let parent = match (row.parent_passenger_id, row.parent_user_id) {
            (Some(id), Some(user_id)) => Some(Passenger {
                id,
                user_id,
                full_name: row.parent_full_name.unwrap_or_default(),
                date_of_birth: row.parent_date_of_birth,
                nationality: row.parent_nationality,
                passport_number: row.parent_passport_number,
                national_id_number: row.parent_national_id_number,
                is_active: row.parent_is_active.unwrap_or(false),
            }),
            _ => None,
        };

        Ok(SeatOccupancy {
            seat: Seat {
                id: row.id,
                flight_id: row.flight_id,
                seat_number: row.seat_number,
                seat_class: row.seat_class.parse::<SeatClass>()?,
                passenger_id: row.passenger_id,
                is_infant_seat: row.is_infant_seat,
                parent_passenger_id: row.parent_passenger_id,
                is_occupied: row.is_occupied,
                booked_at: row.booked_at,
                created_at: row.created_at,
            },
            passenger,
            parent,
        })
    }
}
