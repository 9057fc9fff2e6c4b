use validator::Validate;

use super::{non_blank, require_user, Required};
use crate::db::{Store, UserDirectory};
use crate::dto::{RegisterRequest, SettingsRequest};
use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserPatch};

/// Creates the user on first contact; later calls return the existing row.
pub async fn register(store: &dyn Store, req: RegisterRequest) -> AppResult<User> {
    let Some(telegram_id) = req.telegram_id else {
        return Err(AppError::MissingFields("telegram_id".into()));
    };
    req.validate()?;

    let username = non_blank(req.username);
    let user = store.create_user(telegram_id, username.as_deref()).await?;

    tracing::info!(telegram_id, "User registered");
    Ok(user)
}

/// Partial settings update: only supplied targets change.
pub async fn update_settings(store: &dyn Store, req: SettingsRequest) -> AppResult<User> {
    let mut required = Required::default();
    let Some(telegram_id) = required.take("telegram_id", req.telegram_id) else {
        return Err(required.into_error());
    };
    req.validate()?;

    let patch = UserPatch {
        target_weight_kg: req.target_weight_kg,
        target_sleep_hours: req.target_sleep_hours,
    };
    if patch.is_empty() {
        return require_user(store, telegram_id).await;
    }

    let user = store
        .update_user(telegram_id, &patch)
        .await?
        .ok_or(AppError::UserNotFound)?;

    tracing::info!(telegram_id, ?patch, "Settings updated");
    Ok(user)
}
