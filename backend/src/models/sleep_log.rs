use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::clock::hhmm;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SleepLog {
    pub id: Uuid,
    pub telegram_id: i64,
    pub log_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub sleep_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub sleep_end: NaiveTime,
    pub hours_slept: f64,
    pub quality: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully validated sleep record, ready to be written over whatever exists for its date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSleepLog {
    pub telegram_id: i64,
    pub log_date: NaiveDate,
    pub sleep_start: NaiveTime,
    pub sleep_end: NaiveTime,
    pub hours_slept: f64,
    pub quality: i32,
    pub note: Option<String>,
}
