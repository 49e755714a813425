use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use skyroster_core::model::{CrewRole, FlightCabinCrew, FlightCrew};
use skyroster_core::roster::FlightRosterResponse;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPilotRequest {
    pub flight_id: Uuid,
    pub pilot_id: Uuid,
    pub role: CrewRole,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCabinCrewRequest {
    pub flight_id: Uuid,
    pub cabin_crew_id: Uuid,
    #[serde(default)]
    pub recipe: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignRequest {
    pub flight_id: Uuid,
    #[serde(default = "default_true")]
    pub assign_pilots: bool,
    #[serde(default = "default_true")]
    pub assign_cabin_crew: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub flight_id: Uuid,
    pub is_valid: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/roster/pilots", post(assign_pilot))
        .route("/v1/roster/cabin-crew", post(assign_cabin_crew))
        .route(
            "/v1/roster/flights/{flight_id}/pilots/{pilot_id}",
            delete(remove_pilot),
        )
        .route(
            "/v1/roster/flights/{flight_id}/cabin-crew/{crew_id}",
            delete(remove_cabin_crew),
        )
        .route("/v1/roster/auto-assign", post(auto_assign))
        .route("/v1/roster/flights/{flight_id}/validate", get(validate))
        .route("/v1/roster/flights/{flight_id}", get(flight_roster))
        .route("/v1/roster/flights/{flight_id}/export", get(export_roster))
}

async fn assign_pilot(
    State(state): State<AppState>,
    Json(req): Json<AssignPilotRequest>,
) -> Result<(StatusCode, Json<FlightCrew>), ApiError> {
    let assignment = state
        .crew
        .assign_pilot(req.flight_id, req.pilot_id, req.role, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn assign_cabin_crew(
    State(state): State<AppState>,
    Json(req): Json<AssignCabinCrewRequest>,
) -> Result<(StatusCode, Json<FlightCabinCrew>), ApiError> {
    let assignment = state
        .crew
        .assign_cabin_crew(req.flight_id, req.cabin_crew_id, req.recipe, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn remove_pilot(
    State(state): State<AppState>,
    Path((flight_id, pilot_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.crew.remove_pilot(flight_id, pilot_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_cabin_crew(
    State(state): State<AppState>,
    Path((flight_id, crew_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.crew.remove_cabin_crew(flight_id, crew_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn auto_assign(
    State(state): State<AppState>,
    Json(req): Json<AutoAssignRequest>,
) -> Result<Json<FlightRosterResponse>, ApiError> {
    let roster = state
        .crew
        .auto_assign_crew(
            req.flight_id,
            req.assign_pilots,
            req.assign_cabin_crew,
            Utc::now(),
        )
        .await?;
    Ok(Json(roster))
}

async fn validate(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let is_valid = state.crew.validate_flight_crew(flight_id).await?;
    Ok(Json(ValidationResponse {
        flight_id,
        is_valid,
    }))
}

async fn flight_roster(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<FlightRosterResponse>, ApiError> {
    let roster = state
        .roster
        .flight_roster(flight_id, Utc::now().date_naive())
        .await?;
    Ok(Json(roster))
}

async fn export_roster(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .roster
        .export_roster_json(flight_id, Utc::now().date_naive())
        .await?;
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        document,
    ))
}
