//! Pure eligibility predicates over supplied snapshots. No side effects;
//! callers decide what to do with an ineligible crew member.

use chrono::{DateTime, Utc};
use skyroster_core::error::QualificationGap;
use skyroster_core::model::{CabinCrew, Pilot};

/// First rule a pilot fails for the given flight, or `None` if eligible.
/// Checked in order: active flag, aircraft type, distance limit, license.
pub fn pilot_disqualification(
    pilot: &Pilot,
    aircraft_type: &str,
    distance_km: f64,
    now: DateTime<Utc>,
) -> Option<QualificationGap> {
    if !pilot.is_active {
        return Some(QualificationGap::Inactive);
    }
    if !pilot
        .qualified_aircraft_types
        .iter()
        .any(|t| t == aircraft_type)
    {
        return Some(QualificationGap::AircraftType);
    }
    if pilot.max_flight_distance_km < distance_km {
        return Some(QualificationGap::Distance);
    }
    if pilot.license_expiry <= now {
        return Some(QualificationGap::LicenseExpired);
    }
    None
}

pub fn pilot_qualifies(
    pilot: &Pilot,
    aircraft_type: &str,
    distance_km: f64,
    now: DateTime<Utc>,
) -> bool {
    pilot_disqualification(pilot, aircraft_type, distance_km, now).is_none()
}

/// First rule a cabin crew member fails, or `None` if eligible. Cabin crew
/// carry no distance limit or license expiry.
pub fn cabin_crew_disqualification(crew: &CabinCrew, aircraft_type: &str) -> Option<QualificationGap> {
    if !crew.is_active {
        return Some(QualificationGap::Inactive);
    }
    if !crew
        .qualified_aircraft_types
        .iter()
        .any(|t| t == aircraft_type)
    {
        return Some(QualificationGap::AircraftType);
    }
    None
}

pub fn cabin_crew_qualifies(crew: &CabinCrew, aircraft_type: &str) -> bool {
    cabin_crew_disqualification(crew, aircraft_type).is_none()
}
