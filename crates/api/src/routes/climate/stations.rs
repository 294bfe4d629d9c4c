use axum::{extract::State, http::StatusCode, Json};
use log::error;
use std::sync::Arc;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Distinct station identifiers in the dataset", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let station_ids = state.climate_db.station_ids().await.map_err(|err| {
        error!("error listing stations: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to query stations: {}", err),
        )
    })?;

    Ok(Json(station_ids))
}
