use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{utc_now_naive, NewSlot, Slot, SlotStatus};

use super::{SlotRepository, SqliteRepository};

#[async_trait]
impl SlotRepository for SqliteRepository {
    async fn insert_new_slots(&self, slots: &[NewSlot]) -> Result<u64, CoreError> {
        let mut tx = self.pool.begin().await?;
        let now = utc_now_naive();
        let mut inserted = 0u64;

        for slot in slots {
            // INSERT OR IGNORE rides on the (trainer_id, start_time) unique
            // index: a candidate colliding with an existing slot affects
            // zero rows and simply doesn't count.
            let result = sqlx::query(
                r#"INSERT OR IGNORE INTO slots
                (id, trainer_id, package_id, series_id, kind, status, start_time, end_time,
                 at_pt_gym, at_client, at_other_gym, capacity, expires_at, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                "#,
            )
            .bind(Uuid::now_v7())
            .bind(slot.trainer_id)
            .bind(slot.package_id)
            .bind(&slot.series_id)
            .bind(slot.kind)
            .bind(slot.status)
            .bind(slot.start_time)
            .bind(slot.end_time)
            .bind(slot.modes.at_pt_gym)
            .bind(slot.modes.at_client)
            .bind(slot.modes.at_other_gym)
            .bind(slot.capacity)
            .bind(slot.expires_at)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_slot_by_id(&self, id: Uuid) -> Result<Option<Slot>, CoreError> {
        let slot = sqlx::query_as("SELECT * FROM slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(slot)
    }

    async fn find_slots(
        &self,
        trainer_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Slot>, CoreError> {
        let slots = sqlx::query_as(
            r#"SELECT * FROM slots
            WHERE trainer_id = $1 AND start_time >= $2 AND start_time < $3
            ORDER BY start_time"#,
        )
        .bind(trainer_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(slots)
    }

    async fn find_slots_in_series(&self, series_id: &str) -> Result<Vec<Slot>, CoreError> {
        let slots = sqlx::query_as("SELECT * FROM slots WHERE series_id = $1 ORDER BY start_time")
            .bind(series_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(slots)
    }

    async fn hold_slot(
        &self,
        slot_id: Uuid,
        booking_id: Uuid,
        until: NaiveDateTime,
    ) -> Result<Slot, CoreError> {
        let mut tx = self.pool.begin().await?;

        let slot: Slot = sqlx::query_as("SELECT * FROM slots WHERE id = $1")
            .bind(slot_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Slot {slot_id} not found")))?;

        if slot.status != SlotStatus::Open {
            return Err(CoreError::SlotUnavailable(format!(
                "slot is {}, only OPEN slots can be held",
                slot.status
            )));
        }

        sqlx::query(
            r#"UPDATE slots
            SET status = $1, hold_booking_id = $2, hold_until = $3, updated_at = $4
            WHERE id = $5"#,
        )
        .bind(SlotStatus::Held)
        .bind(booking_id)
        .bind(until)
        .bind(utc_now_naive())
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        let held: Slot = sqlx::query_as("SELECT * FROM slots WHERE id = $1")
            .bind(slot_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(held)
    }

    async fn confirm_slot(&self, slot_id: Uuid, booking_id: Uuid) -> Result<Slot, CoreError> {
        let mut tx = self.pool.begin().await?;

        let slot: Slot = sqlx::query_as("SELECT * FROM slots WHERE id = $1")
            .bind(slot_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Slot {slot_id} not found")))?;

        if slot.status != SlotStatus::Held || slot.hold_booking_id != Some(booking_id) {
            return Err(CoreError::SlotUnavailable(
                "slot is not held by this booking".to_string(),
            ));
        }

        sqlx::query(
            r#"UPDATE slots
            SET status = $1, booked_by_booking = $2, hold_booking_id = NULL, hold_until = NULL,
                updated_at = $3
            WHERE id = $4"#,
        )
        .bind(SlotStatus::Booked)
        .bind(booking_id)
        .bind(utc_now_naive())
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        let booked: Slot = sqlx::query_as("SELECT * FROM slots WHERE id = $1")
            .bind(slot_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(booked)
    }

    async fn release_expired_holds(&self, now: NaiveDateTime) -> Result<u64, CoreError> {
        let result = sqlx::query(
            r#"UPDATE slots
            SET status = $1, hold_booking_id = NULL, hold_until = NULL, updated_at = $2
            WHERE status = $3 AND hold_until IS NOT NULL AND hold_until <= $4"#,
        )
        .bind(SlotStatus::Open)
        .bind(utc_now_naive())
        .bind(SlotStatus::Held)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn purge_expired_slots(&self, now: NaiveDateTime) -> Result<u64, CoreError> {
        let result =
            sqlx::query("DELETE FROM slots WHERE expires_at IS NOT NULL AND expires_at <= $1")
                .bind(now)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}
