use async_trait::async_trait;
use skyroster_core::model::Pilot;
use skyroster_core::repository::{PilotRepository, RepoResult};
use uuid::Uuid;

use crate::rows::PilotRow;

pub struct PostgresPilotRepository {
    pub pool: sqlx::PgPool,
}

#[async_trait]
impl PilotRepository for PostgresPilotRepository {
    async fn find(&self, pilot_id: Uuid) -> RepoResult<Option<Pilot>> {
        let row = sqlx::query_as::<_, PilotRow>(
            r#"
            SELECT id, user_id, full_name, license_number, seniority,
                   max_flight_distance_km, qualified_aircraft_types,
                   total_flight_hours, license_expiry, is_active
            FROM pilots
            WHERE id = $1
            "#,
        )
        .bind(pilot_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Pilot::try_from).transpose()
    }

    async fn qualified_candidates(
        &self,
        aircraft_type: &str,
        min_distance_km: f64,
    ) -> RepoResult<Vec<Pilot>> {
        let rows = sqlx::query_as::<_, PilotRow>(
            r#"
            SELECT id, user_id, full_name, license_number, seniority,
                   max_flight_distance_km, qualified_aircraft_types,
                   total_flight_hours, license_expiry, is_active
            FROM pilots
            WHERE is_active
              AND $1 = ANY(string_to_array(qualified_aircraft_types, ','))
              AND max_flight_distance_km >= $2
              AND license_expiry > now()
            ORDER BY total_flight_hours DESC, id
            "#,
        )
        .bind(aircraft_type)
        .bind(min_distance_km)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Pilot::try_from).collect()
    }
}
