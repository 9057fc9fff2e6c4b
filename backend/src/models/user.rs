use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chat-platform account. The platform's numeric id is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub target_weight_kg: Option<f64>,
    pub target_sleep_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial settings update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub target_weight_kg: Option<f64>,
    pub target_sleep_hours: Option<f64>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.target_weight_kg.is_none() && self.target_sleep_hours.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Targets {
    pub target_weight_kg: Option<f64>,
    pub target_sleep_hours: Option<f64>,
}

impl From<&User> for Targets {
    fn from(u: &User) -> Self {
        Self {
            target_weight_kg: u.target_weight_kg,
            target_sleep_hours: u.target_sleep_hours,
        }
    }
}
