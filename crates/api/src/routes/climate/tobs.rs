use axum::{extract::State, http::StatusCode, Json};
use log::error;
use std::sync::Arc;

use crate::{AppState, TemperatureReading};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Trailing 12 months of temperature readings for the most active station", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, (StatusCode, String)> {
    let readings = state
        .climate_db
        .temperature_observations()
        .await
        .map_err(|err| {
            error!("error fetching temperature observations: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to query temperature observations: {}", err),
            )
        })?;

    Ok(Json(readings))
}
