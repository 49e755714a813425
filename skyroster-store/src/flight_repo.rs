use async_trait::async_trait;
use skyroster_core::model::{Aircraft, Flight};
use skyroster_core::repository::{FlightRepository, RepoResult};
use skyroster_core::roster::{CabinAssignment, PilotAssignment, RosterAggregate, SeatOccupancy};
use uuid::Uuid;

use crate::rows::{
    AircraftRow, CabinAssignmentJoinRow, FlightRow, PilotAssignmentJoinRow, SeatOccupancyRow,
};

pub struct PostgresFlightRepository {
    pub pool: sqlx::PgPool,
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn find_with_aircraft(&self, flight_id: Uuid) -> RepoResult<Option<(Flight, Aircraft)>> {
        let flight = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT id, flight_number, aircraft_id, departure_airport, departure_airport_code,
                   arrival_airport, arrival_airport_code, departure_time, arrival_time,
                   distance_km, is_active
            FROM flights
            WHERE id = $1
            "#,
        )
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(flight) = flight else {
            return Ok(None);
        };

        let aircraft = sqlx::query_as::<_, AircraftRow>(
            r#"
            SELECT id, aircraft_type, registration_number, total_seats, business_class_seats,
                   economy_class_seats, min_crew_required, max_crew_capacity,
                   min_cabin_crew_required, max_cabin_crew_capacity, max_range_km,
                   is_active, created_at
            FROM aircraft
            WHERE id = $1
            "#,
        )
        .bind(flight.aircraft_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(aircraft.map(|a| (flight.into(), a.into())))
    }

    async fn load_roster(&self, flight_id: Uuid) -> RepoResult<Option<RosterAggregate>> {
        let Some((flight, aircraft)) = self.find_with_aircraft(flight_id).await? else {
            return Ok(None);
        };

        let pilot_rows = sqlx::query_as::<_, PilotAssignmentJoinRow>(
            r#"
            SELECT fc.id, fc.flight_id, fc.pilot_id, fc.role, fc.assigned_at, fc.is_active,
                   p.user_id AS pilot_user_id,
                   p.full_name AS pilot_full_name,
                   p.license_number AS pilot_license_number,
                   p.seniority AS pilot_seniority,
                   p.max_flight_distance_km AS pilot_max_flight_distance_km,
                   p.qualified_aircraft_types AS pilot_qualified_aircraft_types,
                   p.total_flight_hours AS pilot_total_flight_hours,
                   p.license_expiry AS pilot_license_expiry,
                   p.is_active AS pilot_is_active
            FROM flight_crew fc
            JOIN pilots p ON p.id = fc.pilot_id
            WHERE fc.flight_id = $1
            ORDER BY fc.assigned_at
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        let cabin_rows = sqlx::query_as::<_, CabinAssignmentJoinRow>(
            r#"
            SELECT fcc.id, fcc.flight_id, fcc.cabin_crew_id, fcc.assigned_recipe,
                   fcc.assigned_at, fcc.is_active,
                   c.user_id AS crew_user_id,
                   c.full_name AS crew_full_name,
                   c.crew_type AS crew_type,
                   c.seniority AS crew_seniority,
                   c.qualified_aircraft_types AS crew_qualified_aircraft_types,
                   c.recipes AS crew_recipes,
                   c.languages AS crew_languages,
                   c.is_active AS crew_is_active
            FROM flight_cabin_crew fcc
            JOIN cabin_crew c ON c.id = fcc.cabin_crew_id
            WHERE fcc.flight_id = $1
            ORDER BY fcc.assigned_at
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        let seat_rows = sqlx::query_as::<_, SeatOccupancyRow>(
            r#"
            SELECT s.id, s.flight_id, s.seat_number, s.seat_class, s.passenger_id,
                   s.is_infant_seat, s.parent_passenger_id, s.is_occupied, s.booked_at,
                   s.created_at,
                   p.user_id AS passenger_user_id,
                   p.full_name AS passenger_full_name,
                   p.date_of_birth AS passenger_date_of_birth,
                   p.nationality AS passenger_nationality,
                   p.passport_number AS passenger_passport_number,
                   p.national_id_number AS passenger_national_id_number,
                   p.is_active AS passenger_is_active,
                   pp.user_id AS parent_user_id,
                   pp.full_name AS parent_full_name,
                   pp.date_of_birth AS parent_date_of_birth,
                   pp.nationality AS parent_nationality,
                   pp.passport_number AS parent_passport_number,
                   pp.national_id_number AS parent_national_id_number,
                   pp.is_active AS parent_is_active
            FROM seats s
            LEFT JOIN passengers p ON p.id = s.passenger_id
            LEFT JOIN passengers pp ON pp.id = s.parent_passenger_id
            WHERE s.flight_id = $1
            ORDER BY s.seq
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        let pilots = pilot_rows
            .into_iter()
            .map(PilotAssignment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let cabin_crew = cabin_rows
            .into_iter()
            .map(CabinAssignment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let seats = seat_rows
            .into_iter()
            .map(SeatOccupancy::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(RosterAggregate {
            flight,
            aircraft,
            pilots,
            cabin_crew,
            seats,
        }))
    }
}
