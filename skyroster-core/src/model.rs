use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Pilot experience rank gating assignment eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilotSeniority {
    Trainee,
    Junior,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CabinCrewSeniority {
    Junior,
    Senior,
}

/// Cabin crew functional role. Chef additionally carries a recipe repertoire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CabinCrewType {
    Regular,
    Chief,
    Chef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatClass {
    Business,
    Economy,
}

/// Cockpit role a pilot is assigned under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrewRole {
    Captain,
    FirstOfficer,
    Trainee,
}

impl PilotSeniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            PilotSeniority::Trainee => "Trainee",
            PilotSeniority::Junior => "Junior",
            PilotSeniority::Senior => "Senior",
        }
    }
}

impl CabinCrewSeniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinCrewSeniority::Junior => "Junior",
            CabinCrewSeniority::Senior => "Senior",
        }
    }
}

impl CabinCrewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinCrewType::Regular => "Regular",
            CabinCrewType::Chief => "Chief",
            CabinCrewType::Chef => "Chef",
        }
    }
}

impl SeatClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Business => "Business",
            SeatClass::Economy => "Economy",
        }
    }
}

impl CrewRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrewRole::Captain => "Captain",
            CrewRole::FirstOfficer => "First Officer",
            CrewRole::Trainee => "Trainee",
        }
    }
}

macro_rules! impl_display_fromstr {
    ($ty:ident { $($text:literal => $variant:ident),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(format!(concat!("unknown ", stringify!($ty), ": {}"), other)),
                }
            }
        }
    };
}

impl_display_fromstr!(PilotSeniority { "Trainee" => Trainee, "Junior" => Junior, "Senior" => Senior });
impl_display_fromstr!(CabinCrewSeniority { "Junior" => Junior, "Senior" => Senior });
impl_display_fromstr!(CabinCrewType { "Regular" => Regular, "Chief" => Chief, "Chef" => Chef });
impl_display_fromstr!(SeatClass { "Business" => Business, "Economy" => Economy });
impl_display_fromstr!(CrewRole { "Captain" => Captain, "First Officer" => FirstOfficer, "Trainee" => Trainee });

/// Airframe configuration: seat split plus crew capacity bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
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

impl Aircraft {
    /// Business + economy must account for every seat.
    pub fn seat_split_consistent(&self) -> bool {
        self.business_class_seats + self.economy_class_seats == self.total_seats
    }

    pub fn crew_bounds_consistent(&self) -> bool {
        self.min_crew_required <= self.max_crew_capacity
            && self.min_cabin_crew_required <= self.max_cabin_crew_capacity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub license_number: String,
    pub seniority: PilotSeniority,
    pub max_flight_distance_km: f64,
    pub qualified_aircraft_types: Vec<String>,
    pub total_flight_hours: i32,
    pub license_expiry: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinCrew {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub crew_type: CabinCrewType,
    pub seniority: CabinCrewSeniority,
    pub qualified_aircraft_types: Vec<String>,
    /// Populated for Chef members only; 2-4 dishes.
    pub recipes: Vec<String>,
    pub languages: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub national_id_number: Option<String>,
    pub is_active: bool,
}

/// One physical seat of one flight. Generated once per flight, then mutated
/// in place by bookings; never recreated while occupied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub seat_class: SeatClass,
    pub passenger_id: Option<Uuid>,
    pub is_infant_seat: bool,
    pub parent_passenger_id: Option<Uuid>,
    pub is_occupied: bool,
    pub booked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Active pilot assignment row. At most one active row per (flight, pilot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightCrew {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub pilot_id: Uuid,
    pub role: CrewRole,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Active cabin crew assignment row. The recipe is only meaningful for Chefs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightCabinCrew {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub cabin_crew_id: Uuid,
    pub assigned_recipe: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
}
