use async_trait::async_trait;
use skyroster_core::model::{FlightCabinCrew, FlightCrew};
use skyroster_core::repository::{AssignmentRepository, RepoResult};
use uuid::Uuid;

pub struct PostgresAssignmentRepository {
    pub pool: sqlx::PgPool,
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn is_pilot_assigned(&self, flight_id: Uuid, pilot_id: Uuid) -> RepoResult<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM flight_crew
                WHERE flight_id = $1 AND pilot_id = $2 AND is_active
            )
            "#,
        )
        .bind(flight_id)
        .bind(pilot_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    async fn save_pilot_assignment(&self, assignment: &FlightCrew) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO flight_crew (id, flight_id, pilot_id, role, assigned_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.flight_id)
        .bind(assignment.pilot_id)
        .bind(assignment.role.as_str())
        .bind(assignment.assigned_at)
        .bind(assignment.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_pilot_assignment(&self, flight_id: Uuid, pilot_id: Uuid) -> RepoResult<()> {
        // soft delete; absent rows make this a no-op
        sqlx::query(
            r#"
            UPDATE flight_crew SET is_active = FALSE
            WHERE flight_id = $1 AND pilot_id = $2 AND is_active
            "#,
        )
        .bind(flight_id)
        .bind(pilot_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_cabin_crew_assigned(&self, flight_id: Uuid, crew_id: Uuid) -> RepoResult<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM flight_cabin_crew
                WHERE flight_id = $1 AND cabin_crew_id = $2 AND is_active
            )
            "#,
        )
        .bind(flight_id)
        .bind(crew_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    async fn save_cabin_assignment(&self, assignment: &FlightCabinCrew) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO flight_cabin_crew
                (id, flight_id, cabin_crew_id, assigned_recipe, assigned_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.flight_id)
        .bind(assignment.cabin_crew_id)
        .bind(assignment.assigned_recipe.as_deref())
        .bind(assignment.assigned_at)
        .bind(assignment.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_cabin_assignment(&self, flight_id: Uuid, crew_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE flight_cabin_crew SET is_active = FALSE
            WHERE flight_id = $1 AND cabin_crew_id = $2 AND is_active
            "#,
        )
        .bind(flight_id)
        .bind(crew_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
