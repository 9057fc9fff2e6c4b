use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeightLog {
    pub id: Uuid,
    pub telegram_id: i64,
    pub log_date: NaiveDate,
    pub weight_kg: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWeightLog {
    pub telegram_id: i64,
    pub log_date: NaiveDate,
    pub weight_kg: f64,
    pub note: Option<String>,
}
