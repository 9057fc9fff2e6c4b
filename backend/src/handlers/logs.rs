use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::dto::{
    OkResponse, SleepLogRequest, SleepLoggedResponse, WeightLogRequest, WeightLoggedResponse,
};
use crate::error::AppResult;
use crate::models::LogKind;
use crate::services::logs;
use crate::AppState;

pub async fn upsert_sleep(
    State(state): State<AppState>,
    payload: Result<Json<SleepLogRequest>, JsonRejection>,
) -> AppResult<Json<SleepLoggedResponse>> {
    let Json(body) = payload?;
    let logged = logs::log_sleep(state.store.as_ref(), body).await?;

    Ok(Json(SleepLoggedResponse {
        ok: true,
        sleep: logged.log,
        hours: logged.hours,
        quality: logged.quality,
    }))
}

pub async fn upsert_weight(
    State(state): State<AppState>,
    payload: Result<Json<WeightLogRequest>, JsonRejection>,
) -> AppResult<Json<WeightLoggedResponse>> {
    let Json(body) = payload?;
    let weight = logs::log_weight(state.store.as_ref(), body).await?;

    Ok(Json(WeightLoggedResponse { ok: true, weight }))
}

pub async fn delete_sleep(
    State(state): State<AppState>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> AppResult<Json<OkResponse>> {
    let Path((telegram_id, date)) = path?;
    logs::delete_log(state.store.as_ref(), LogKind::Sleep, telegram_id, &date).await?;
    Ok(Json(OkResponse::new()))
}

pub async fn delete_weight(
    State(state): State<AppState>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> AppResult<Json<OkResponse>> {
    let Path((telegram_id, date)) = path?;
    logs::delete_log(state.store.as_ref(), LogKind::Weight, telegram_id, &date).await?;
    Ok(Json(OkResponse::new()))
}
