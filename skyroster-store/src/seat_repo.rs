use async_trait::async_trait;
use skyroster_core::model::Seat;
use skyroster_core::repository::{RepoResult, SeatRepository};
use uuid::Uuid;

use crate::rows::SeatRow;

const SEAT_COLUMNS: &str = "id, flight_id, seat_number, seat_class, passenger_id, \
     is_infant_seat, parent_passenger_id, is_occupied, booked_at, created_at";

pub struct PostgresSeatRepository {
    pub pool: sqlx::PgPool,
}

#[async_trait]
impl SeatRepository for PostgresSeatRepository {
    async fn find(&self, seat_id: Uuid) -> RepoResult<Option<Seat>> {
        let row = sqlx::query_as::<_, SeatRow>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE id = $1"
        ))
        .bind(seat_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Seat::try_from).transpose()
    }

    async fn for_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
        let rows = sqlx::query_as::<_, SeatRow>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE flight_id = $1 ORDER BY seq"
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Seat::try_from).collect()
    }

    async fn available_for_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
        // seq preserves the generated layout order: business rows first,
        // then economy
        let rows = sqlx::query_as::<_, SeatRow>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats \
             WHERE flight_id = $1 AND NOT is_occupied ORDER BY seq"
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Seat::try_from).collect()
    }

    async fn save(&self, seat: &Seat) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE seats
            SET passenger_id = $2, is_infant_seat = $3, parent_passenger_id = $4,
                is_occupied = $5, booked_at = $6
            WHERE id = $1
            "#,
        )
        .bind(seat.id)
        .bind(seat.passenger_id)
        .bind(seat.is_infant_seat)
        .bind(seat.parent_passenger_id)
        .bind(seat.is_occupied)
        .bind(seat.booked_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save_all(&self, seats: &[Seat]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;
        for seat in seats {
            sqlx::query(
                r#"
                INSERT INTO seats
                    (id, flight_id, seat_number, seat_class, passenger_id, is_infant_seat,
                     parent_passenger_id, is_occupied, booked_at, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(seat.id)
            .bind(seat.flight_id)
            .bind(&seat.seat_number)
            .bind(seat.seat_class.as_str())
            .bind(seat.passenger_id)
            .bind(seat.is_infant_seat)
            .bind(seat.parent_passenger_id)
            .bind(seat.is_occupied)
            .bind(seat.booked_at)
            .bind(seat.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
