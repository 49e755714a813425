use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyroster_core::error::{ErrorKind, RosterError};

/// Wraps the engine error taxonomy for axum. Statuses are derived from the
/// coarse [`ErrorKind`], not from individual variants.
#[derive(Debug)]
pub struct ApiError(pub RosterError);

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyAssigned | ErrorKind::SeatConflict | ErrorKind::LayoutAlreadyExists => {
            StatusCode::CONFLICT
        }
        ErrorKind::NotQualified | ErrorKind::CapacityViolation | ErrorKind::InvalidRecipe => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "internal server error");
            "Internal Server Error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyroster_core::error::{CapacityRule, EntityKind};
    use uuid::Uuid;

    #[test]
    fn statuses_follow_error_kinds() {
        let flight_id = Uuid::new_v4();

        let not_found = RosterError::NotFound {
            entity: EntityKind::Flight,
            id: flight_id,
        };
        assert_eq!(status_for(not_found.kind()), StatusCode::NOT_FOUND);

        let occupied = RosterError::SeatOccupied {
            flight_id,
            seat_id: Uuid::new_v4(),
        };
        assert_eq!(status_for(occupied.kind()), StatusCode::CONFLICT);

        let capacity = RosterError::CapacityViolation {
            flight_id,
            rule: CapacityRule::NoSeniorPilot,
        };
        assert_eq!(status_for(capacity.kind()), StatusCode::UNPROCESSABLE_ENTITY);

        let storage = RosterError::Storage("boom".into());
        assert_eq!(
            status_for(storage.kind()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
