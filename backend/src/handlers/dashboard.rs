use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use chrono::Local;

use crate::dto::{DataResponse, StreakResponse};
use crate::error::AppResult;
use crate::services::dashboard::{self, Dashboard};
use crate::AppState;

pub async fn get_dashboard(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let Path(telegram_id) = path?;
    let dash = dashboard::dashboard(state.store.as_ref(), telegram_id).await?;
    Ok(Json(DataResponse::new(dash)))
}

pub async fn get_streak(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<StreakResponse>> {
    let Path(telegram_id) = path?;
    let today = Local::now().date_naive();
    let summary = dashboard::streak(state.store.as_ref(), telegram_id, today).await?;

    Ok(Json(StreakResponse {
        ok: true,
        streak: summary.current,
        longest_streak: summary.longest,
    }))
}
