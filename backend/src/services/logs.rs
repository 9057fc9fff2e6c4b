use serde_json::Value;
use validator::Validate;

use super::{non_blank, parse_date, require_user, Required};
use crate::db::{LogStore, Store};
use crate::dto::{SleepLogRequest, WeightLogRequest};
use crate::error::{AppError, AppResult};
use crate::models::sleep_log::{NewSleepLog, SleepLog};
use crate::models::weight_log::{NewWeightLog, WeightLog};
use crate::models::LogKind;
use crate::scoring::{parse_hhmm, sleep_hours, sleep_quality};

#[derive(Debug, Clone)]
pub struct SleepLogged {
    pub log: SleepLog,
    pub hours: f64,
    pub quality: i32,
}

/// Validates a sleep submission, derives hours and quality, and writes it over
/// any existing entry for the same (user, date).
pub async fn log_sleep(store: &dyn Store, req: SleepLogRequest) -> AppResult<SleepLogged> {
    let mut required = Required::default();
    let telegram_id = required.take("telegram_id", req.telegram_id);
    let date = required.take("date", non_blank(req.date.clone()));
    let start = required.take("sleep_start", non_blank(req.sleep_start.clone()));
    let end = required.take("sleep_end", non_blank(req.sleep_end.clone()));
    let (Some(telegram_id), Some(date), Some(start), Some(end)) = (telegram_id, date, start, end)
    else {
        return Err(required.into_error());
    };

    req.validate()?;
    let log_date = parse_date(&date)?;
    let sleep_start = parse_hhmm(&start).map_err(|e| AppError::InvalidFormat(e.to_string()))?;
    let sleep_end = parse_hhmm(&end).map_err(|e| AppError::InvalidFormat(e.to_string()))?;

    require_user(store, telegram_id).await?;

    let hours = sleep_hours(sleep_start, sleep_end);
    let quality = sleep_quality(hours, Some(sleep_start));

    let log = store
        .upsert_sleep(&NewSleepLog {
            telegram_id,
            log_date,
            sleep_start,
            sleep_end,
            hours_slept: hours,
            quality,
            note: non_blank(req.note),
        })
        .await?;

    tracing::info!(telegram_id, date = %log_date, hours, quality, "Sleep logged");

    Ok(SleepLogged { log, hours, quality })
}

pub async fn log_weight(store: &dyn Store, req: WeightLogRequest) -> AppResult<WeightLog> {
    let mut required = Required::default();
    let telegram_id = required.take("telegram_id", req.telegram_id);
    let date = required.take("date", non_blank(req.date.clone()));
    let weight = required.take("weight", req.weight.clone().filter(|v| !is_blank(v)));
    let (Some(telegram_id), Some(date), Some(weight)) = (telegram_id, date, weight) else {
        return Err(required.into_error());
    };

    req.validate()?;
    let log_date = parse_date(&date)?;
    let weight_kg = coerce_weight(&weight)?;

    require_user(store, telegram_id).await?;

    let log = store
        .upsert_weight(&NewWeightLog {
            telegram_id,
            log_date,
            weight_kg,
            note: non_blank(req.note),
        })
        .await?;

    tracing::info!(telegram_id, date = %log_date, weight_kg, "Weight logged");

    Ok(log)
}

/// Removes the (user, date) entry if there is one. Succeeds either way.
pub async fn delete_log(
    store: &dyn Store,
    kind: LogKind,
    telegram_id: i64,
    date: &str,
) -> AppResult<()> {
    let log_date = parse_date(date)?;
    let removed = store.delete_log(kind, telegram_id, log_date).await?;

    tracing::debug!(telegram_id, date = %log_date, ?kind, removed, "Log delete");

    Ok(())
}

/// Accepts a JSON number or a numeric string (decimal comma allowed).
/// The result must be finite and positive.
pub fn coerce_weight(raw: &Value) -> AppResult<f64> {
    let kg = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };

    match kg {
        Some(kg) if kg.is_finite() && kg > 0.0 => Ok(kg),
        _ => Err(AppError::InvalidFormat(format!("weight is not a number: {raw}"))),
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}
