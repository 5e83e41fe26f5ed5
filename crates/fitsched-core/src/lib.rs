//! # Fitsched Core Library
//!
//! Scheduling core for a personal-trainer marketplace: turns a package's
//! weekday recurrence and a trainer's weekly working hours into concrete
//! bookable slots, and keeps previously generated schedules honest by
//! carrying expired, unclaimed slots forward to the next matching weekday.
//!
//! ## Features
//!
//! - **Deterministic slot generation**: week-anchored weekday expansion and
//!   greedy interval slicing — same inputs, same ordered output
//! - **Carry-forward reconciliation**: stale unclaimed slots are relocated
//!   past the end of the surviving schedule, preserving time-of-day
//! - **Idempotent persistence**: duplicate-tolerant bulk insert over a
//!   `(trainer, start_time)` uniqueness constraint makes regeneration safe
//!   to re-run
//! - **Timezone awareness**: trainer profiles carry an IANA timezone and
//!   all wall-clock arithmetic happens in it
//! - **Tolerant input cleaning**: malformed weekday patterns are filtered,
//!   never fatal
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`pattern`]: Weekday pattern normalization
//! - [`timegrid`]: Clock arithmetic and working-interval slicing
//! - [`recurrence`]: Occurrence dates and preview slot building
//! - [`carryforward`]: Stale-slot reconciliation
//! - [`schedule`]: The Preview and Generate operations
//! - [`repository`]: Data access layer with Repository pattern
//! - [`timezone`]: Timezone validation and local-clock helpers
//! - [`error`]: Error types with context
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitsched_core::{
//!     db,
//!     repository::SqliteRepository,
//!     schedule::{preview_schedule, PackageSource, ScheduleRequest},
//! };
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("fitsched.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let package_id: Uuid = "01920b6a-7a33-7bbd-9e4d-3c55aa7b7b01".parse()?;
//!     let request = ScheduleRequest::new(PackageSource::Stored(package_id));
//!     let slots = preview_schedule(&repo, &request).await?;
//!     for slot in slots {
//!         println!("{} {}-{}", slot.date, slot.start_clock, slot.end_clock);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod carryforward;
pub mod db;
pub mod error;
pub mod models;
pub mod pattern;
pub mod recurrence;
pub mod repository;
pub mod schedule;
pub mod timegrid;
pub mod timezone;
