use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{LogStore, Store, StoreResult, UserDirectory};
use crate::models::sleep_log::{NewSleepLog, SleepLog};
use crate::models::user::{User, UserPatch};
use crate::models::weight_log::{NewWeightLog, WeightLog};
use crate::models::LogKind;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_user(&self, telegram_id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE telegram_id = $1")
            .bind(telegram_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, telegram_id: i64, username: Option<&str>) -> StoreResult<User> {
        // No-op update so RETURNING yields the existing row on conflict
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, username)
            VALUES ($1, $2)
            ON CONFLICT (telegram_id) DO UPDATE
                SET telegram_id = users.telegram_id
            RETURNING *
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update_user(&self, telegram_id: i64, patch: &UserPatch) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                target_weight_kg = COALESCE($2, target_weight_kg),
                target_sleep_hours = COALESCE($3, target_sleep_hours),
                updated_at = NOW()
            WHERE telegram_id = $1
            RETURNING *
            "#,
        )
        .bind(telegram_id)
        .bind(patch.target_weight_kg)
        .bind(patch.target_sleep_hours)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl LogStore for PgStore {
    async fn upsert_sleep(&self, log: &NewSleepLog) -> StoreResult<SleepLog> {
        // Last write wins on every field, note included
        let row = sqlx::query_as::<_, SleepLog>(
            r#"
            INSERT INTO sleep_logs
                (id, telegram_id, log_date, sleep_start, sleep_end, hours_slept, quality, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (telegram_id, log_date) DO UPDATE SET
                sleep_start = EXCLUDED.sleep_start,
                sleep_end = EXCLUDED.sleep_end,
                hours_slept = EXCLUDED.hours_slept,
                quality = EXCLUDED.quality,
                note = EXCLUDED.note,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(log.telegram_id)
        .bind(log.log_date)
        .bind(log.sleep_start)
        .bind(log.sleep_end)
        .bind(log.hours_slept)
        .bind(log.quality)
        .bind(&log.note)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn upsert_weight(&self, log: &NewWeightLog) -> StoreResult<WeightLog> {
        let row = sqlx::query_as::<_, WeightLog>(
            r#"
            INSERT INTO weight_logs (id, telegram_id, log_date, weight_kg, note)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (telegram_id, log_date) DO UPDATE SET
                weight_kg = EXCLUDED.weight_kg,
                note = EXCLUDED.note,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(log.telegram_id)
        .bind(log.log_date)
        .bind(log.weight_kg)
        .bind(&log.note)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete_log(
        &self,
        kind: LogKind,
        telegram_id: i64,
        date: NaiveDate,
    ) -> StoreResult<bool> {
        // Table name comes from a closed enum, never from input
        let sql = format!(
            "DELETE FROM {} WHERE telegram_id = $1 AND log_date = $2",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(telegram_id)
            .bind(date)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn recent_sleep(&self, telegram_id: i64, limit: i64) -> StoreResult<Vec<SleepLog>> {
        let rows = sqlx::query_as::<_, SleepLog>(
            r#"
            SELECT * FROM sleep_logs
            WHERE telegram_id = $1
            ORDER BY log_date DESC
            LIMIT $2
            "#,
        )
        .bind(telegram_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn recent_weight(&self, telegram_id: i64, limit: i64) -> StoreResult<Vec<WeightLog>> {
        let rows = sqlx::query_as::<_, WeightLog>(
            r#"
            SELECT * FROM weight_logs
            WHERE telegram_id = $1
            ORDER BY log_date DESC
            LIMIT $2
            "#,
        )
        .bind(telegram_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn all_sleep(&self, telegram_id: i64) -> StoreResult<Vec<SleepLog>> {
        let rows = sqlx::query_as::<_, SleepLog>(
            "SELECT * FROM sleep_logs WHERE telegram_id = $1 ORDER BY log_date DESC",
        )
        .bind(telegram_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
