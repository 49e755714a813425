use async_trait::async_trait;
use skyroster_core::model::CabinCrew;
use skyroster_core::repository::{CabinCrewRepository, RepoResult};
use uuid::Uuid;

use crate::rows::CabinCrewRow;

pub struct PostgresCabinCrewRepository {
    pub pool: sqlx::PgPool,
}

#[async_trait]
impl CabinCrewRepository for PostgresCabinCrewRepository {
    async fn find(&self, crew_id: Uuid) -> RepoResult<Option<CabinCrew>> {
        let row = sqlx::query_as::<_, CabinCrewRow>(
            r#"
            SELECT id, user_id, full_name, crew_type, seniority,
                   qualified_aircraft_types, recipes, languages, is_active
            FROM cabin_crew
            WHERE id = $1
            "#,
        )
        .bind(crew_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CabinCrew::try_from).transpose()
    }

    async fn qualified_candidates(&self, aircraft_type: &str) -> RepoResult<Vec<CabinCrew>> {
        let rows = sqlx::query_as::<_, CabinCrewRow>(
            r#"
            SELECT id, user_id, full_name, crew_type, seniority,
                   qualified_aircraft_types, recipes, languages, is_active
            FROM cabin_crew
            WHERE is_active
              AND $1 = ANY(string_to_array(qualified_aircraft_types, ','))
            ORDER BY full_name, id
            "#,
        )
        .bind(aircraft_type)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CabinCrew::try_from).collect()
    }
}
