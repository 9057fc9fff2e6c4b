//! Core operations behind both the HTTP API and the chat bot. Each takes the
//! store explicitly so it can run against any `Store` implementation.

pub mod dashboard;
pub mod logs;
pub mod users;

use chrono::NaiveDate;

use crate::db::{Store, UserDirectory};
use crate::error::{AppError, AppResult};
use crate::models::user::User;

pub async fn require_user(store: &dyn Store, telegram_id: i64) -> AppResult<User> {
    store
        .find_user(telegram_id)
        .await?
        .ok_or(AppError::UserNotFound)
}

pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidFormat(format!("invalid date {raw:?}, expected YYYY-MM-DD")))
}

/// Blank strings count as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Collects the names of absent required inputs.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn take<T>(&mut self, name: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }

    pub fn into_error(self) -> AppError {
        AppError::MissingFields(self.missing.join(", "))
    }
}
