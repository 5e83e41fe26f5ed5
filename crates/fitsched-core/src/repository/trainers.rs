use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{utc_now_naive, NewTrainerData, TrainerProfile, WorkingHour};
use crate::timegrid::Interval;
use crate::timezone::validate_timezone;

use super::{SqliteRepository, TrainerRepository};

#[async_trait]
impl TrainerRepository for SqliteRepository {
    async fn add_trainer(&self, data: NewTrainerData) -> Result<TrainerProfile, CoreError> {
        if data.display_name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Trainer display name must not be empty.".to_string(),
            ));
        }
        if data.default_break_min < 0 {
            return Err(CoreError::InvalidInput(
                "Break duration cannot be negative.".to_string(),
            ));
        }
        let timezone = data.timezone.unwrap_or_else(|| "UTC".to_string());
        validate_timezone(&timezone)?;

        let now = utc_now_naive();
        let trainer = TrainerProfile {
            id: Uuid::now_v7(),
            display_name: data.display_name,
            default_break_min: data.default_break_min,
            timezone,
            modes: data.modes,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO trainer_profiles
            (id, display_name, default_break_min, timezone, at_pt_gym, at_client, at_other_gym, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(trainer.id)
        .bind(&trainer.display_name)
        .bind(trainer.default_break_min)
        .bind(&trainer.timezone)
        .bind(trainer.modes.at_pt_gym)
        .bind(trainer.modes.at_client)
        .bind(trainer.modes.at_other_gym)
        .bind(trainer.created_at)
        .bind(trainer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(trainer)
    }

    async fn find_trainer_by_id(&self, id: Uuid) -> Result<Option<TrainerProfile>, CoreError> {
        let trainer = sqlx::query_as("SELECT * FROM trainer_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(trainer)
    }

    async fn add_working_hours(
        &self,
        trainer_id: Uuid,
        day_of_week: i64,
        start_clock: &str,
        end_clock: &str,
    ) -> Result<(), CoreError> {
        if !(0..=6).contains(&day_of_week) {
            return Err(CoreError::InvalidInput(format!(
                "Weekday must be 0..=6 (0 = Sunday), got {day_of_week}."
            )));
        }
        if Interval::from_clocks(start_clock, end_clock).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "Invalid interval {start_clock}-{end_clock}: expected HH:MM with start before end."
            )));
        }
        if self.find_trainer_by_id(trainer_id).await?.is_none() {
            return Err(CoreError::NotFound(format!(
                "Trainer {trainer_id} not found"
            )));
        }

        sqlx::query(
            r#"INSERT INTO working_hours (trainer_id, day_of_week, start_clock, end_clock)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(trainer_id)
        .bind(day_of_week)
        .bind(start_clock)
        .bind(end_clock)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_working_hours(&self, trainer_id: Uuid) -> Result<Vec<WorkingHour>, CoreError> {
        let rows = sqlx::query_as(
            "SELECT * FROM working_hours WHERE trainer_id = $1 ORDER BY day_of_week, start_clock",
        )
        .bind(trainer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
