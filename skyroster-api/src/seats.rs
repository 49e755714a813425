use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use skyroster_core::model::Seat;
use skyroster_core::roster::SeatMapResponse;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSeatRequest {
    pub passenger_id: Uuid,
    #[serde(default)]
    pub is_infant_seat: bool,
    #[serde(default)]
    pub parent_passenger_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignSeatsResponse {
    pub flight_id: Uuid,
    pub assigned_count: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/{flight_id}/seats/generate", post(generate_seats))
        .route("/v1/flights/{flight_id}/seat-map", get(seat_map))
        .route(
            "/v1/flights/{flight_id}/seats/auto-assign",
            post(auto_assign_seats),
        )
        .route("/v1/seats/{seat_id}/book", post(book_seat))
}

async fn generate_seats(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<Seat>>), ApiError> {
    let seats = state.seats.generate_seats(flight_id, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(seats)))
}

async fn seat_map(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<SeatMapResponse>, ApiError> {
    let map = state.seats.seat_map(flight_id).await?;
    Ok(Json(map))
}

async fn auto_assign_seats(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<AutoAssignSeatsResponse>, ApiError> {
    let assigned_count = state.seats.auto_assign_seats(flight_id, Utc::now()).await?;
    Ok(Json(AutoAssignSeatsResponse {
        flight_id,
        assigned_count,
    }))
}

async fn book_seat(
    State(state): State<AppState>,
    Path(seat_id): Path<Uuid>,
    Json(req): Json<BookSeatRequest>,
) -> Result<Json<Seat>, ApiError> {
    let seat = state
        .seats
        .book_seat(
            seat_id,
            req.passenger_id,
            req.is_infant_seat,
            req.parent_passenger_id,
            Utc::now(),
        )
        .await?;
    Ok(Json(seat))
}
