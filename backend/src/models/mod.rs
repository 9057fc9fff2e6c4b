pub mod sleep_log;
pub mod user;
pub mod weight_log;

use serde::{Deserialize, Serialize};

/// The two per-day log categories; each lives in its own table keyed by (user, date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Sleep,
    Weight,
}

impl LogKind {
    pub fn table(self) -> &'static str {
        match self {
            LogKind::Sleep => "sleep_logs",
            LogKind::Weight => "weight_logs",
        }
    }
}
