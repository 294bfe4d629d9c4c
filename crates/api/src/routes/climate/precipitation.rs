use axum::{extract::State, http::StatusCode, Json};
use log::error;
use std::{collections::BTreeMap, sync::Arc};

use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Daily precipitation for the trailing 12 calendar months, keyed by date", body = BTreeMap<String, Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, (StatusCode, String)> {
    let report = state
        .climate_db
        .precipitation_report()
        .await
        .map_err(|err| {
            error!("error building precipitation report: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to query precipitation: {}", err),
            )
        })?;

    Ok(Json(report))
}
