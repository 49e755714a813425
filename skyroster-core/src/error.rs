use std::fmt;
use uuid::Uuid;

/// Entity referenced by a failing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Aircraft,
    Flight,
    Pilot,
    CabinCrew,
    Passenger,
    Seat,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Aircraft => "aircraft",
            EntityKind::Flight => "flight",
            EntityKind::Pilot => "pilot",
            EntityKind::CabinCrew => "cabin crew",
            EntityKind::Passenger => "passenger",
            EntityKind::Seat => "seat",
        };
        f.write_str(name)
    }
}

/// Which qualification rule a crew member fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualificationGap {
    Inactive,
    AircraftType,
    Distance,
    LicenseExpired,
}

impl fmt::Display for QualificationGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            QualificationGap::Inactive => "crew member is not active",
            QualificationGap::AircraftType => "not qualified for this aircraft type",
            QualificationGap::Distance => "flight distance exceeds the qualified maximum",
            QualificationGap::LicenseExpired => "license has expired",
        };
        f.write_str(reason)
    }
}

/// Which minimum-tier rule automatic assignment cannot satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityRule {
    NoQualifiedPilots,
    NoSeniorPilot,
    NoJuniorPilot,
    NoQualifiedCabinCrew,
}

impl fmt::Display for CapacityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self {
            CapacityRule::NoQualifiedPilots => "no qualified pilots available",
            CapacityRule::NoSeniorPilot => "at least one senior pilot is required",
            CapacityRule::NoJuniorPilot => "at least one junior pilot is required",
            CapacityRule::NoQualifiedCabinCrew => "no qualified cabin crew available",
        };
        f.write_str(rule)
    }
}

/// Coarse error kind per failure class; the API layer maps these to HTTP
/// statuses without matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyAssigned,
    NotQualified,
    CapacityViolation,
    SeatConflict,
    InvalidRecipe,
    LayoutAlreadyExists,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("crew member {member_id} is already assigned to flight {flight_id}")]
    AlreadyAssigned { flight_id: Uuid, member_id: Uuid },

    #[error("crew member {member_id} is not qualified for flight {flight_id}: {reason}")]
    NotQualified {
        flight_id: Uuid,
        member_id: Uuid,
        reason: QualificationGap,
    },

    #[error("cannot complete assignment for flight {flight_id}: {rule}")]
    CapacityViolation { flight_id: Uuid, rule: CapacityRule },

    #[error("seat {seat_id} on flight {flight_id} is already occupied")]
    SeatOccupied { flight_id: Uuid, seat_id: Uuid },

    #[error("flight {flight_id} has {available} free seats for {requested} passengers")]
    InsufficientSeats {
        flight_id: Uuid,
        requested: usize,
        available: usize,
    },

    #[error("booking seat {seat_id} as an infant seat requires a parent passenger")]
    MissingParentPassenger { seat_id: Uuid },

    #[error("recipe {recipe:?} is not in the repertoire of cabin crew {crew_id}")]
    InvalidRecipe { crew_id: Uuid, recipe: String },

    #[error("seats already generated for flight {flight_id}")]
    LayoutAlreadyExists { flight_id: Uuid },

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::NotFound { .. } => ErrorKind::NotFound,
            RosterError::AlreadyAssigned { .. } => ErrorKind::AlreadyAssigned,
            RosterError::NotQualified { .. } => ErrorKind::NotQualified,
            RosterError::CapacityViolation { .. } => ErrorKind::CapacityViolation,
            RosterError::SeatOccupied { .. }
            | RosterError::InsufficientSeats { .. }
            | RosterError::MissingParentPassenger { .. } => ErrorKind::SeatConflict,
            RosterError::InvalidRecipe { .. } => ErrorKind::InvalidRecipe,
            RosterError::LayoutAlreadyExists { .. } => ErrorKind::LayoutAlreadyExists,
            RosterError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for RosterError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        RosterError::Storage(err)
    }
}
