use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::error;
use std::sync::Arc;

use crate::{AppState, TemperatureStats};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
    ),
    responses(
        (status = OK, description = "Temperature summary from the start date onward", body = TemperatureStats),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn temperature_stats(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    stats_response(&state, start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
        ("end" = String, Path, description = "End date (YYYY-MM-DD), inclusive"),
    ),
    responses(
        (status = OK, description = "Temperature summary between the two dates", body = TemperatureStats),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn temperature_stats_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    stats_response(&state, start, Some(end)).await
}

async fn stats_response(
    state: &AppState,
    start: String,
    end: Option<String>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    let stats = state
        .climate_db
        .temperature_stats(start, end)
        .await
        .map_err(|err| {
            error!("error computing temperature stats: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to query temperature stats: {}", err),
            )
        })?;

    Ok(Json(stats))
}
