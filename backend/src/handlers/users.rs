use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dto::{DataResponse, RegisterRequest, SettingsRequest};
use crate::error::AppResult;
use crate::models::user::User;
use crate::services::users;
use crate::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<User>>> {
    let Json(body) = payload?;
    let user = users::register(state.store.as_ref(), body).await?;
    Ok(Json(DataResponse::new(user)))
}

pub async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<User>>> {
    let Json(body) = payload?;
    let user = users::update_settings(state.store.as_ref(), body).await?;
    Ok(Json(DataResponse::new(user)))
}
