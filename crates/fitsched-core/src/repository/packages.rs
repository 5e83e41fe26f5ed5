use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{utc_now_naive, NewPackageData, Package};

use super::{PackageRepository, SqliteRepository, TrainerRepository};

#[async_trait]
impl PackageRepository for SqliteRepository {
    async fn add_package(&self, data: NewPackageData) -> Result<Package, CoreError> {
        if data.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Package name must not be empty.".to_string(),
            ));
        }
        if data.total_sessions < 1 {
            return Err(CoreError::InvalidInput(
                "A package needs at least one session.".to_string(),
            ));
        }
        if data.session_duration_min < 1 {
            return Err(CoreError::InvalidInput(
                "Session duration must be positive.".to_string(),
            ));
        }
        if data.patterns.is_empty() {
            return Err(CoreError::InvalidInput(
                "A recurring package needs at least one weekday pattern.".to_string(),
            ));
        }
        if self.find_trainer_by_id(data.trainer_id).await?.is_none() {
            return Err(CoreError::NotFound(format!(
                "Trainer {} not found",
                data.trainer_id
            )));
        }

        // Stored in the nested client shape, so the read path exercises the
        // same cleaning as externally written documents.
        let recurrence_json = serde_json::to_string(&data.patterns)
            .map_err(|e| CoreError::InvalidInput(format!("Unserializable pattern: {e}")))?;

        let now = utc_now_naive();
        let package = Package {
            id: Uuid::now_v7(),
            trainer_id: data.trainer_id,
            name: data.name.trim().to_string(),
            total_sessions: data.total_sessions,
            session_duration_min: data.session_duration_min,
            recurrence_json,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO packages
            (id, trainer_id, name, total_sessions, session_duration_min, recurrence_json, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(package.id)
        .bind(package.trainer_id)
        .bind(&package.name)
        .bind(package.total_sessions)
        .bind(package.session_duration_min)
        .bind(&package.recurrence_json)
        .bind(package.is_active)
        .bind(package.created_at)
        .bind(package.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(package)
    }

    async fn find_package_by_id(&self, id: Uuid) -> Result<Option<Package>, CoreError> {
        let package = sqlx::query_as("SELECT * FROM packages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(package)
    }

    async fn find_packages_for_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<Package>, CoreError> {
        let packages =
            sqlx::query_as("SELECT * FROM packages WHERE trainer_id = $1 ORDER BY created_at")
                .bind(trainer_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(packages)
    }
}
