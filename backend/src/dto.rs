//! # Request/Response DTOs
//!
//! JSON contract types shared by the mini-app API and the chat-bot dispatcher.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON. Required inputs are still
//!   `Option` so an absent field surfaces as `missing_fields`, not a serde
//!   rejection.
//! - `*Response` → serialized to client JSON, always carrying `"ok": true`.
//! - Bounds on optional values are expressed via `validator` derive macros.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::sleep_log::SleepLog;
use crate::models::weight_log::WeightLog;

// ============================================================================
// Users
// ============================================================================

/// POST /api/users — first contact from the bot or mini-app
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    pub telegram_id: Option<i64>,

    #[validate(length(max = 64, message = "Username too long"))]
    pub username: Option<String>,
}

/// PUT /api/settings — partial update, absent fields are left as they are
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SettingsRequest {
    pub telegram_id: Option<i64>,

    #[validate(range(min = 20.0, max = 500.0, message = "Target weight must be 20-500 kg"))]
    pub target_weight_kg: Option<f64>,

    #[validate(range(min = 1.0, max = 24.0, message = "Target sleep must be 1-24 hours"))]
    pub target_sleep_hours: Option<f64>,
}

// ============================================================================
// Logs
// ============================================================================

/// POST /api/sleep
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SleepLogRequest {
    pub telegram_id: Option<i64>,

    /// Calendar date the night is filed under, `YYYY-MM-DD`
    pub date: Option<String>,

    /// `HH:MM`
    pub sleep_start: Option<String>,

    /// `HH:MM`; at or before `sleep_start` means the next morning
    pub sleep_end: Option<String>,

    #[validate(length(max = 1000, message = "Note must be under 1000 characters"))]
    pub note: Option<String>,
}

/// POST /api/weight
#[derive(Debug, Default, Deserialize, Validate)]
pub struct WeightLogRequest {
    pub telegram_id: Option<i64>,

    pub date: Option<String>,

    /// Kilograms, as a JSON number or a numeric string
    pub weight: Option<serde_json::Value>,

    #[validate(length(max = 1000, message = "Note must be under 1000 characters"))]
    pub note: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Generic `{ ok, data }` envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Response for POST /api/sleep
#[derive(Debug, Serialize)]
pub struct SleepLoggedResponse {
    pub ok: bool,
    pub sleep: SleepLog,
    pub hours: f64,
    pub quality: i32,
}

/// Response for POST /api/weight
#[derive(Debug, Serialize)]
pub struct WeightLoggedResponse {
    pub ok: bool,
    pub weight: WeightLog,
}

/// Response for GET /api/streak/{telegram_id}
#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub ok: bool,
    pub streak: u32,
    pub longest_streak: u32,
}
