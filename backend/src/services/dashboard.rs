use chrono::NaiveDate;
use serde::Serialize;

use super::require_user;
use crate::db::{LogStore, Store};
use crate::error::AppResult;
use crate::models::sleep_log::SleepLog;
use crate::models::user::Targets;
use crate::models::weight_log::WeightLog;
use crate::scoring::{current_streak, longest_streak};

/// Rows per category shown on the dashboard.
pub const DASHBOARD_WINDOW: i64 = 7;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub sleep: Vec<SleepLog>,
    pub weight: Vec<WeightLog>,
    pub targets: Targets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

pub async fn dashboard(store: &dyn Store, telegram_id: i64) -> AppResult<Dashboard> {
    let user = require_user(store, telegram_id).await?;

    let (sleep, weight) = tokio::try_join!(
        store.recent_sleep(telegram_id, DASHBOARD_WINDOW),
        store.recent_weight(telegram_id, DASHBOARD_WINDOW),
    )?;

    Ok(Dashboard {
        sleep,
        weight,
        targets: Targets::from(&user),
    })
}

/// Streaks over the full sleep history, not just the dashboard window.
pub async fn streak(
    store: &dyn Store,
    telegram_id: i64,
    today: NaiveDate,
) -> AppResult<StreakSummary> {
    require_user(store, telegram_id).await?;

    let dates: Vec<NaiveDate> = store
        .all_sleep(telegram_id)
        .await?
        .iter()
        .map(|log| log.log_date)
        .collect();

    Ok(StreakSummary {
        current: current_streak(&dates, today),
        longest: longest_streak(&dates),
    })
}
