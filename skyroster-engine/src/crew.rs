//! Manual and automatic pilot / cabin crew assignment.
//!
//! Every mutating entry point takes the flight's lock first and re-reads
//! state through the repositories before deciding, so a retried request that
//! already committed is rejected as already-assigned instead of duplicated.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skyroster_core::error::{CapacityRule, EntityKind, QualificationGap, RosterError};
use skyroster_core::model::{
    Aircraft, CabinCrew, CabinCrewSeniority, CabinCrewType, CrewRole, Flight, FlightCabinCrew,
    FlightCrew, Pilot, PilotSeniority,
};
use skyroster_core::repository::{
    AssignmentRepository, CabinCrewRepository, FlightRepository, PilotRepository,
};
use skyroster_core::roster::FlightRosterResponse;
use uuid::Uuid;

use crate::export;
use crate::locks::FlightLocks;
use crate::qualification;
use crate::recipe::RecipeSelector;
use crate::validator::CrewComposition;

pub struct CrewAssignmentEngine {
    flights: Arc<dyn FlightRepository>,
    pilots: Arc<dyn PilotRepository>,
    cabin_crew: Arc<dyn CabinCrewRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    locks: Arc<FlightLocks>,
    recipes: Arc<dyn RecipeSelector>,
}

impl CrewAssignmentEngine {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        pilots: Arc<dyn PilotRepository>,
        cabin_crew: Arc<dyn CabinCrewRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        locks: Arc<FlightLocks>,
        recipes: Arc<dyn RecipeSelector>,
    ) -> Self {
        Self {
            flights,
            pilots,
            cabin_crew,
            assignments,
            locks,
            recipes,
        }
    }

    /// Assign one pilot to one flight under the given role.
    pub async fn assign_pilot(
        &self,
        flight_id: Uuid,
        pilot_id: Uuid,
        role: CrewRole,
        now: DateTime<Utc>,
    ) -> Result<FlightCrew, RosterError> {
        let _guard = self.locks.acquire(flight_id).await;
        self.assign_pilot_locked(flight_id, pilot_id, role, now).await
    }

    /// Assign one cabin crew member, optionally with a recipe (Chefs only).
    pub async fn assign_cabin_crew(
        &self,
        flight_id: Uuid,
        crew_id: Uuid,
        recipe: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<FlightCabinCrew, RosterError> {
        let _guard = self.locks.acquire(flight_id).await;
        self.assign_cabin_crew_locked(flight_id, crew_id, recipe, now).await
    }

    /// Remove a pilot assignment. Removing an assignment that does not exist
    /// is a no-op.
    pub async fn remove_pilot(&self, flight_id: Uuid, pilot_id: Uuid) -> Result<(), RosterError> {
        let _guard = self.locks.acquire(flight_id).await;
        self.assignments.delete_pilot_assignment(flight_id, pilot_id).await?;
        tracing::debug!(%flight_id, %pilot_id, "pilot assignment removed");
        Ok(())
    }

    /// Remove a cabin crew assignment. Idempotent like `remove_pilot`.
    pub async fn remove_cabin_crew(&self, flight_id: Uuid, crew_id: Uuid) -> Result<(), RosterError> {
        let _guard = self.locks.acquire(flight_id).await;
        self.assignments.delete_cabin_assignment(flight_id, crew_id).await?;
        tracing::debug!(%flight_id, %crew_id, "cabin crew assignment removed");
        Ok(())
    }

    /// Greedy rule-bounded crew selection without operator input, then the
    /// refreshed roster document.
    pub async fn auto_assign_crew(
        &self,
        flight_id: Uuid,
        assign_pilots: bool,
        assign_cabin_crew: bool,
        now: DateTime<Utc>,
    ) -> Result<FlightRosterResponse, RosterError> {
        let _guard = self.locks.acquire(flight_id).await;

        let roster = self
            .flights
            .load_roster(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;

        if assign_pilots {
            self.auto_assign_pilots_locked(&roster.flight, &roster.aircraft, now)
                .await?;
        }
        if assign_cabin_crew {
            self.auto_assign_cabin_crew_locked(&roster.flight, &roster.aircraft, now)
                .await?;
        }

        let refreshed = self
            .flights
            .load_roster(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;
        Ok(export::build_roster_response(&refreshed, now.date_naive()))
    }

    /// Whether the flight's current crew composition satisfies the tier
    /// thresholds. An unknown flight is reported as invalid, not an error.
    pub async fn validate_flight_crew(&self, flight_id: Uuid) -> Result<bool, RosterError> {
        match self.flights.load_roster(flight_id).await? {
            Some(roster) => Ok(CrewComposition::of(&roster).is_valid()),
            None => Ok(false),
        }
    }

    async fn assign_pilot_locked(
        &self,
        flight_id: Uuid,
        pilot_id: Uuid,
        role: CrewRole,
        now: DateTime<Utc>,
    ) -> Result<FlightCrew, RosterError> {
        let (flight, aircraft) = self
            .flights
            .find_with_aircraft(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;

        let pilot = self
            .pilots
            .find(pilot_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Pilot,
                id: pilot_id,
            })?;

        if !pilot.is_active {
            return Err(RosterError::NotQualified {
                flight_id,
                member_id: pilot_id,
                reason: QualificationGap::Inactive,
            });
        }

        if self.assignments.is_pilot_assigned(flight_id, pilot_id).await? {
            return Err(RosterError::AlreadyAssigned {
                flight_id,
                member_id: pilot_id,
            });
        }

        if let Some(reason) = qualification::pilot_disqualification(
            &pilot,
            &aircraft.aircraft_type,
            flight.distance_km,
            now,
        ) {
            return Err(RosterError::NotQualified {
                flight_id,
                member_id: pilot_id,
                reason,
            });
        }

        // The license is part of the qualification predicate above, but the
        // established flow checks it a second time on its own; keep both.
        if pilot.license_expiry <= now {
            return Err(RosterError::NotQualified {
                flight_id,
                member_id: pilot_id,
                reason: QualificationGap::LicenseExpired,
            });
        }

        let assignment = FlightCrew {
            id: Uuid::new_v4(),
            flight_id,
            pilot_id,
            role,
            assigned_at: now,
            is_active: true,
        };
        self.assignments.save_pilot_assignment(&assignment).await?;
        tracing::info!(%flight_id, %pilot_id, role = role.as_str(), "pilot assigned");
        Ok(assignment)
    }

    async fn assign_cabin_crew_locked(
        &self,
        flight_id: Uuid,
        crew_id: Uuid,
        recipe: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<FlightCabinCrew, RosterError> {
        let (_, aircraft) = self
            .flights
            .find_with_aircraft(flight_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::Flight,
                id: flight_id,
            })?;

        let crew = self
            .cabin_crew
            .find(crew_id)
            .await?
            .ok_or(RosterError::NotFound {
                entity: EntityKind::CabinCrew,
                id: crew_id,
            })?;

        if !crew.is_active {
            return Err(RosterError::NotQualified {
                flight_id,
                member_id: crew_id,
                reason: QualificationGap::Inactive,
            });
        }

        if self.assignments.is_cabin_crew_assigned(flight_id, crew_id).await? {
            return Err(RosterError::AlreadyAssigned {
                flight_id,
                member_id: crew_id,
            });
        }

        if let Some(reason) =
            qualification::cabin_crew_disqualification(&crew, &aircraft.aircraft_type)
        {
            return Err(RosterError::NotQualified {
                flight_id,
                member_id: crew_id,
                reason,
            });
        }

        let assigned_recipe = match recipe {
            None => None,
            Some(requested) => {
                let in_repertoire = crew.crew_type == CabinCrewType::Chef
                    && crew.recipes.iter().any(|r| r == &requested);
                if !in_repertoire {
                    return Err(RosterError::InvalidRecipe {
                        crew_id,
                        recipe: requested,
                    });
                }
                Some(requested)
            }
        };

        let assignment = FlightCabinCrew {
            id: Uuid::new_v4(),
            flight_id,
            cabin_crew_id: crew_id,
            assigned_recipe,
            assigned_at: now,
            is_active: true,
        };
        self.assignments.save_cabin_assignment(&assignment).await?;
        tracing::info!(%flight_id, %crew_id, "cabin crew assigned");
        Ok(assignment)
    }

    /// Captain = most experienced qualified senior, First Officer = most
    /// experienced qualified junior, then up to two trainees as capacity
    /// allows. Equal flight hours are broken by lowest pilot id.
    async fn auto_assign_pilots_locked(
        &self,
        flight: &Flight,
        aircraft: &Aircraft,
        now: DateTime<Utc>,
    ) -> Result<(), RosterError> {
        let candidates = self
            .pilots
            .qualified_candidates(&aircraft.aircraft_type, flight.distance_km)
            .await?;
        let qualified: Vec<Pilot> = candidates
            .into_iter()
            .filter(|p| {
                qualification::pilot_qualifies(p, &aircraft.aircraft_type, flight.distance_km, now)
            })
            .collect();

        if qualified.is_empty() {
            return Err(RosterError::CapacityViolation {
                flight_id: flight.id,
                rule: CapacityRule::NoQualifiedPilots,
            });
        }

        let seniors: Vec<&Pilot> = qualified
            .iter()
            .filter(|p| p.seniority == PilotSeniority::Senior)
            .collect();
        let juniors: Vec<&Pilot> = qualified
            .iter()
            .filter(|p| p.seniority == PilotSeniority::Junior)
            .collect();
        let trainees: Vec<&Pilot> = qualified
            .iter()
            .filter(|p| p.seniority == PilotSeniority::Trainee)
            .collect();

        let captain = most_experienced(&seniors).ok_or(RosterError::CapacityViolation {
            flight_id: flight.id,
            rule: CapacityRule::NoSeniorPilot,
        })?;
        let first_officer = most_experienced(&juniors).ok_or(RosterError::CapacityViolation {
            flight_id: flight.id,
            rule: CapacityRule::NoJuniorPilot,
        })?;

        self.assign_pilot_locked(flight.id, captain.id, CrewRole::Captain, now)
            .await?;
        self.assign_pilot_locked(flight.id, first_officer.id, CrewRole::FirstOfficer, now)
            .await?;

        let assigned = 2usize;
        // a malformed row with a negative capacity must read as zero, not wrap
        let seat_budget =
            usize::try_from(aircraft.max_crew_capacity).unwrap_or(0).saturating_sub(assigned);
        let trainee_count = 2usize.min(trainees.len()).min(seat_budget);
        for trainee in trainees.iter().take(trainee_count) {
            self.assign_pilot_locked(flight.id, trainee.id, CrewRole::Trainee, now)
                .await?;
        }

        Ok(())
    }

    /// One chief first (consuming a senior slot), then senior regulars up to
    /// the senior target, junior regulars up to the junior target, and up to
    /// two chefs with a selected recipe, all capped by the aircraft's cabin
    /// crew capacity.
    async fn auto_assign_cabin_crew_locked(
        &self,
        flight: &Flight,
        aircraft: &Aircraft,
        now: DateTime<Utc>,
    ) -> Result<(), RosterError> {
        let candidates = self
            .cabin_crew
            .qualified_candidates(&aircraft.aircraft_type)
            .await?;
        let qualified: Vec<CabinCrew> = candidates
            .into_iter()
            .filter(|c| qualification::cabin_crew_qualifies(c, &aircraft.aircraft_type))
            .collect();

        if qualified.is_empty() {
            return Err(RosterError::CapacityViolation {
                flight_id: flight.id,
                rule: CapacityRule::NoQualifiedCabinCrew,
            });
        }

        let chiefs: Vec<&CabinCrew> = qualified
            .iter()
            .filter(|c| c.crew_type == CabinCrewType::Chief)
            .collect();
        let chefs: Vec<&CabinCrew> = qualified
            .iter()
            .filter(|c| c.crew_type == CabinCrewType::Chef)
            .collect();
        let senior_regular: Vec<&CabinCrew> = qualified
            .iter()
            .filter(|c| {
                c.crew_type == CabinCrewType::Regular && c.seniority == CabinCrewSeniority::Senior
            })
            .collect();
        let junior_regular: Vec<&CabinCrew> = qualified
            .iter()
            .filter(|c| {
                c.crew_type == CabinCrewType::Regular && c.seniority == CabinCrewSeniority::Junior
            })
            .collect();

        let capacity = usize::try_from(aircraft.max_cabin_crew_capacity).unwrap_or(0);
        let mut assigned = 0usize;

        let mut senior_target = 4usize.min(1usize.max(senior_regular.len() + chiefs.len()));

        if let Some(chief) = chiefs.first() {
            self.assign_cabin_crew_locked(flight.id, chief.id, None, now)
                .await?;
            assigned += 1;
            senior_target -= 1;
        }

        for crew in senior_regular.iter().take(senior_target) {
            self.assign_cabin_crew_locked(flight.id, crew.id, None, now)
                .await?;
            assigned += 1;
        }

        let junior_target = 16usize
            .min(4usize.max(junior_regular.len()))
            .min(capacity.saturating_sub(assigned));
        for crew in junior_regular.iter().take(junior_target) {
            self.assign_cabin_crew_locked(flight.id, crew.id, None, now)
                .await?;
            assigned += 1;
        }

        let chef_target = 2usize
            .min(chefs.len())
            .min(capacity.saturating_sub(assigned));
        for chef in chefs.iter().take(chef_target) {
            let recipe = self.recipes.pick(&chef.recipes);
            self.assign_cabin_crew_locked(flight.id, chef.id, recipe, now)
                .await?;
            assigned += 1;
        }

        tracing::info!(flight_id = %flight.id, crew = assigned, "cabin crew auto-assigned");
        Ok(())
    }
}

fn most_experienced<'a>(pilots: &[&'a Pilot]) -> Option<&'a Pilot> {
    pilots
        .iter()
        .max_by(|a, b| {
            a.total_flight_hours
                .cmp(&b.total_flight_hours)
                .then_with(|| b.id.cmp(&a.id))
        })
        .copied()
}
