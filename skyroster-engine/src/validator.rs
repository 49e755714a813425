//! Roster health check: does the flight's current crew composition satisfy
//! the tier thresholds. A Chief is deliberately not required; the thresholds
//! count seniority tiers and chefs only.

use skyroster_core::model::{CabinCrewSeniority, CabinCrewType, PilotSeniority};
use skyroster_core::roster::RosterAggregate;

/// Tier counts of a flight's active crew assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrewComposition {
    pub senior_pilots: usize,
    pub junior_pilots: usize,
    pub trainee_pilots: usize,
    pub senior_cabin_crew: usize,
    pub junior_cabin_crew: usize,
    pub chefs: usize,
}

impl CrewComposition {
    pub fn of(roster: &RosterAggregate) -> Self {
        let mut composition = CrewComposition::default();

        for assigned in roster.active_pilots() {
            match assigned.pilot.seniority {
                PilotSeniority::Senior => composition.senior_pilots += 1,
                PilotSeniority::Junior => composition.junior_pilots += 1,
                PilotSeniority::Trainee => composition.trainee_pilots += 1,
            }
        }

        for assigned in roster.active_cabin_crew() {
            match assigned.crew.seniority {
                CabinCrewSeniority::Senior => composition.senior_cabin_crew += 1,
                CabinCrewSeniority::Junior => composition.junior_cabin_crew += 1,
            }
            if assigned.crew.crew_type == CabinCrewType::Chef {
                composition.chefs += 1;
            }
        }

        composition
    }

    /// All thresholds must hold: ≥1 senior pilot, ≥1 junior pilot, ≤2
    /// trainees, 1-4 senior cabin crew, 4-16 junior cabin crew, ≤2 chefs.
    pub fn is_valid(&self) -> bool {
        self.senior_pilots >= 1
            && self.junior_pilots >= 1
            && self.trainee_pilots <= 2
            && (1..=4).contains(&self.senior_cabin_crew)
            && (4..=16).contains(&self.junior_cabin_crew)
            && self.chefs <= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composition(
        senior_pilots: usize,
        junior_pilots: usize,
        trainee_pilots: usize,
        senior_cabin_crew: usize,
        junior_cabin_crew: usize,
        chefs: usize,
    ) -> CrewComposition {
        CrewComposition {
            senior_pilots,
            junior_pilots,
            trainee_pilots,
            senior_cabin_crew,
            junior_cabin_crew,
            chefs,
        }
    }

    #[test]
    fn minimal_valid_roster() {
        // 1 senior + 1 junior pilot, 1 senior + 4 junior cabin crew, 1 chef
        assert!(composition(1, 1, 0, 1, 4, 1).is_valid());
    }

    #[test]
    fn missing_senior_cabin_crew_fails() {
        assert!(!composition(1, 1, 0, 0, 4, 1).is_valid());
    }

    #[test]
    fn pilot_thresholds() {
        assert!(!composition(0, 1, 0, 1, 4, 0).is_valid());
        assert!(!composition(1, 0, 0, 1, 4, 0).is_valid());
        assert!(composition(1, 1, 2, 1, 4, 0).is_valid());
        assert!(!composition(1, 1, 3, 1, 4, 0).is_valid());
    }

    #[test]
    fn cabin_thresholds() {
        assert!(composition(1, 1, 0, 4, 16, 2).is_valid());
        assert!(!composition(1, 1, 0, 5, 16, 2).is_valid());
        assert!(!composition(1, 1, 0, 4, 3, 0).is_valid());
        assert!(!composition(1, 1, 0, 4, 17, 0).is_valid());
        assert!(!composition(1, 1, 0, 4, 16, 3).is_valid());
    }

    #[test]
    fn chief_is_not_required() {
        // Composition says nothing about chiefs; a roster with none can pass.
        assert!(composition(2, 1, 1, 2, 5, 0).is_valid());
    }
}
