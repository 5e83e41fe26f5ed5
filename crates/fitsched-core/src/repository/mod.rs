//! Data access layer: repository traits per concern, one SQLite-backed
//! implementation. The scheduling engine itself never touches the pool —
//! it consumes and produces plain values, and the operations in
//! [`crate::schedule`] wire the two together.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    NewPackageData, NewSlot, NewTrainerData, Package, Slot, TrainerProfile, WorkingHour,
};

mod packages;
mod slots;
mod trainers;

#[async_trait]
pub trait TrainerRepository {
    async fn add_trainer(&self, data: NewTrainerData) -> Result<TrainerProfile, CoreError>;
    async fn find_trainer_by_id(&self, id: Uuid) -> Result<Option<TrainerProfile>, CoreError>;
    /// Adds one weekly open interval for a trainer. Clock strings must be
    /// well-formed "HH:MM" with start before end.
    async fn add_working_hours(
        &self,
        trainer_id: Uuid,
        day_of_week: i64,
        start_clock: &str,
        end_clock: &str,
    ) -> Result<(), CoreError>;
    async fn find_working_hours(&self, trainer_id: Uuid) -> Result<Vec<WorkingHour>, CoreError>;
}

#[async_trait]
pub trait PackageRepository {
    async fn add_package(&self, data: NewPackageData) -> Result<Package, CoreError>;
    async fn find_package_by_id(&self, id: Uuid) -> Result<Option<Package>, CoreError>;
    async fn find_packages_for_trainer(&self, trainer_id: Uuid)
        -> Result<Vec<Package>, CoreError>;
}

#[async_trait]
pub trait SlotRepository {
    /// Duplicate-tolerant bulk insert: candidates colliding with an
    /// existing `(trainer, start_time)` are skipped, and the returned count
    /// covers genuinely-new rows only. This is the contract that makes
    /// regeneration safe to re-run.
    async fn insert_new_slots(&self, slots: &[NewSlot]) -> Result<u64, CoreError>;
    async fn find_slot_by_id(&self, id: Uuid) -> Result<Option<Slot>, CoreError>;
    async fn find_slots(
        &self,
        trainer_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Slot>, CoreError>;
    async fn find_slots_in_series(&self, series_id: &str) -> Result<Vec<Slot>, CoreError>;
    /// OPEN -> HELD with a hold record, for the checkout window.
    async fn hold_slot(
        &self,
        slot_id: Uuid,
        booking_id: Uuid,
        until: NaiveDateTime,
    ) -> Result<Slot, CoreError>;
    /// HELD -> BOOKED, only for the booking that owns the hold.
    async fn confirm_slot(&self, slot_id: Uuid, booking_id: Uuid) -> Result<Slot, CoreError>;
    /// Reverts HELD slots whose hold expired back to OPEN. Returns how many.
    async fn release_expired_holds(&self, now: NaiveDateTime) -> Result<u64, CoreError>;
    /// Deletes slots whose retention anchor has passed. Returns how many.
    async fn purge_expired_slots(&self, now: NaiveDateTime) -> Result<u64, CoreError>;
}

pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}
