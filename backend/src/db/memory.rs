use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{LogStore, Store, StoreError, StoreResult, UserDirectory};
use crate::models::sleep_log::{NewSleepLog, SleepLog};
use crate::models::user::{User, UserPatch};
use crate::models::weight_log::{NewWeightLog, WeightLog};
use crate::models::LogKind;

type DayKey = (i64, NaiveDate);

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    sleep: BTreeMap<DayKey, SleepLog>,
    weight: BTreeMap<DayKey, WeightLog>,
}

/// In-process store with the same (user, date) uniqueness as the Postgres schema.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn sleep_count(&self, telegram_id: i64) -> usize {
        let tables = self.tables.lock().await;
        tables.sleep.keys().filter(|(id, _)| *id == telegram_id).count()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

fn newest_first<T: Clone>(
    rows: &BTreeMap<DayKey, T>,
    telegram_id: i64,
    limit: Option<usize>,
) -> Vec<T> {
    rows.iter()
        .rev()
        .filter(|((id, _), _)| *id == telegram_id)
        .take(limit.unwrap_or(usize::MAX))
        .map(|(_, row)| row.clone())
        .collect()
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_user(&self, telegram_id: i64) -> StoreResult<Option<User>> {
        self.check_online()?;
        Ok(self.tables.lock().await.users.get(&telegram_id).cloned())
    }

    async fn create_user(&self, telegram_id: i64, username: Option<&str>) -> StoreResult<User> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let user = tables.users.entry(telegram_id).or_insert_with(|| User {
            telegram_id,
            username: username.map(String::from),
            target_weight_kg: None,
            target_sleep_hours: None,
            created_at: now,
            updated_at: now,
        });
        Ok(user.clone())
    }

    async fn update_user(&self, telegram_id: i64, patch: &UserPatch) -> StoreResult<Option<User>> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        let Some(user) = tables.users.get_mut(&telegram_id) else {
            return Ok(None);
        };
        if let Some(kg) = patch.target_weight_kg {
            user.target_weight_kg = Some(kg);
        }
        if let Some(hours) = patch.target_sleep_hours {
            user.target_sleep_hours = Some(hours);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl LogStore for MemoryStore {
    async fn upsert_sleep(&self, log: &NewSleepLog) -> StoreResult<SleepLog> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let key = (log.telegram_id, log.log_date);
        let (id, created_at) = tables
            .sleep
            .get(&key)
            .map(|existing| (existing.id, existing.created_at))
            .unwrap_or_else(|| (Uuid::new_v4(), now));

        let row = SleepLog {
            id,
            telegram_id: log.telegram_id,
            log_date: log.log_date,
            sleep_start: log.sleep_start,
            sleep_end: log.sleep_end,
            hours_slept: log.hours_slept,
            quality: log.quality,
            note: log.note.clone(),
            created_at,
            updated_at: now,
        };
        tables.sleep.insert(key, row.clone());
        Ok(row)
    }

    async fn upsert_weight(&self, log: &NewWeightLog) -> StoreResult<WeightLog> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let key = (log.telegram_id, log.log_date);
        let (id, created_at) = tables
            .weight
            .get(&key)
            .map(|existing| (existing.id, existing.created_at))
            .unwrap_or_else(|| (Uuid::new_v4(), now));

        let row = WeightLog {
            id,
            telegram_id: log.telegram_id,
            log_date: log.log_date,
            weight_kg: log.weight_kg,
            note: log.note.clone(),
            created_at,
            updated_at: now,
        };
        tables.weight.insert(key, row.clone());
        Ok(row)
    }

    async fn delete_log(
        &self,
        kind: LogKind,
        telegram_id: i64,
        date: NaiveDate,
    ) -> StoreResult<bool> {
        self.check_online()?;
        let mut tables = self.tables.lock().await;
        let key = (telegram_id, date);
        let removed = match kind {
            LogKind::Sleep => tables.sleep.remove(&key).is_some(),
            LogKind::Weight => tables.weight.remove(&key).is_some(),
        };
        Ok(removed)
    }

    async fn recent_sleep(&self, telegram_id: i64, limit: i64) -> StoreResult<Vec<SleepLog>> {
        self.check_online()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(newest_first(&self.tables.lock().await.sleep, telegram_id, Some(limit)))
    }

    async fn recent_weight(&self, telegram_id: i64, limit: i64) -> StoreResult<Vec<WeightLog>> {
        self.check_online()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(newest_first(&self.tables.lock().await.weight, telegram_id, Some(limit)))
    }

    async fn all_sleep(&self, telegram_id: i64) -> StoreResult<Vec<SleepLog>> {
        self.check_online()?;
        Ok(newest_first(&self.tables.lock().await.sleep, telegram_id, None))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.check_online()
    }
}
