use async_trait::async_trait;
use skyroster_core::model::Passenger;
use skyroster_core::repository::{PassengerRepository, RepoResult};
use uuid::Uuid;

use crate::rows::PassengerRow;

pub struct PostgresPassengerRepository {
    pub pool: sqlx::PgPool,
}

#[async_trait]
impl PassengerRepository for PostgresPassengerRepository {
    async fn find(&self, passenger_id: Uuid) -> RepoResult<Option<Passenger>> {
        let row = sqlx::query_as::<_, PassengerRow>(
            r#"
            SELECT id, user_id, full_name, date_of_birth, nationality,
                   passport_number, national_id_number, is_active
            FROM passengers
            WHERE id = $1
            "#,
        )
        .bind(passenger_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Passenger::from))
    }

    async fn awaiting_seat(&self, flight_id: Uuid) -> RepoResult<Vec<Passenger>> {
        // Passengers on the manifest who do not hold an occupied seat yet,
        // in manifest order.
        let rows = sqlx::query_as::<_, PassengerRow>(
            r#"
            SELECT p.id, p.user_id, p.full_name, p.date_of_birth, p.nationality,
                   p.passport_number, p.national_id_number, p.is_active
            FROM flight_passengers fp
            JOIN passengers p ON p.id = fp.passenger_id
            WHERE fp.flight_id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM seats s
                  WHERE s.flight_id = fp.flight_id
                    AND s.passenger_id = p.id
                    AND s.is_occupied
              )
            ORDER BY fp.seq
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Passenger::from).collect())
    }
}
