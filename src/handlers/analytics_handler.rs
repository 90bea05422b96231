use std::sync::Arc;

use axum::{extract::State, Json};
use log::info;
use tokio::task;

use crate::{
    analytics::{build_report, collect_samples},
    error::AppError,
    models::analytics::AnalyticsReport,
    state::AppState,
};

pub async fn analytics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalyticsReport>, AppError> {
    info!("Analytics request");

    let samples = collect_samples(&state.store)?;
    let report = task::spawn_blocking(move || build_report(&samples))
        .await
        .map_err(|error| AppError::Internal(format!("chart rendering failed: {}", error)))?;

    Ok(Json(report))
}
