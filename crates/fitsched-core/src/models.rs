use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::pattern::{self, WeekdayPattern};
use crate::timegrid::Interval;

/// Slot lifecycle status. Stored as the original wire strings so data stays
/// readable alongside any other consumer of the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum SlotStatus {
    #[sqlx(rename = "OPEN")]
    #[serde(rename = "OPEN")]
    Open,
    #[sqlx(rename = "BLOCKED")]
    #[serde(rename = "BLOCKED")]
    Blocked,
    #[sqlx(rename = "BOOKED")]
    #[serde(rename = "BOOKED")]
    Booked,
    #[sqlx(rename = "RESERVED_FOR_PACKAGE")]
    #[serde(rename = "RESERVED_FOR_PACKAGE")]
    ReservedForPackage,
    #[sqlx(rename = "HELD")]
    #[serde(rename = "HELD")]
    Held,
}

impl SlotStatus {
    /// Whether the slot is still unclaimed: nobody booked it and nothing is
    /// holding it. Unclaimed past slots are the carry-forward candidates.
    pub fn is_unclaimed(self) -> bool {
        matches!(self, SlotStatus::Open | SlotStatus::ReservedForPackage)
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SlotStatus::Open => "OPEN",
            SlotStatus::Blocked => "BLOCKED",
            SlotStatus::Booked => "BOOKED",
            SlotStatus::ReservedForPackage => "RESERVED_FOR_PACKAGE",
            SlotStatus::Held => "HELD",
        };
        write!(f, "{s}")
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid slot status: {0}")]
pub struct ParseSlotStatusError(String);

impl FromStr for SlotStatus {
    type Err = ParseSlotStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(SlotStatus::Open),
            "BLOCKED" => Ok(SlotStatus::Blocked),
            "BOOKED" => Ok(SlotStatus::Booked),
            "RESERVED_FOR_PACKAGE" => Ok(SlotStatus::ReservedForPackage),
            "HELD" => Ok(SlotStatus::Held),
            _ => Err(ParseSlotStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Recurring,
    Single,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKind::Recurring => write!(f, "recurring"),
            SlotKind::Single => write!(f, "single"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid slot kind: {0}")]
pub struct ParseSlotKindError(String);

impl FromStr for SlotKind {
    type Err = ParseSlotKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recurring" => Ok(SlotKind::Recurring),
            "single" => Ok(SlotKind::Single),
            _ => Err(ParseSlotKindError(s.to_string())),
        }
    }
}

/// Where a trainer can deliver a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DeliveryModes {
    pub at_pt_gym: bool,
    pub at_client: bool,
    pub at_other_gym: bool,
}

impl Default for DeliveryModes {
    fn default() -> Self {
        Self {
            at_pt_gym: true,
            at_client: false,
            at_other_gym: false,
        }
    }
}

/// Trainer profile as the scheduling core sees it: break policy, timezone
/// and delivery modes. Profile editing belongs to another subsystem; this
/// data is read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainerProfile {
    pub id: Uuid,
    pub display_name: String,
    pub default_break_min: i64,
    /// IANA timezone name; "now" and default base dates are derived in it.
    pub timezone: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub modes: DeliveryModes,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One open interval of a trainer's week, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkingHour {
    pub trainer_id: Uuid,
    pub day_of_week: i64,
    pub start_clock: String,
    pub end_clock: String,
}

/// Per-weekday open intervals, keyed by weekday index (0 = Sunday).
pub type WorkingHours = BTreeMap<u8, Vec<Interval>>;

/// Builds the per-weekday interval map from stored rows. Rows with an
/// out-of-range weekday, an unparseable clock, or start >= end are dropped
/// rather than rejected, matching the tolerance for messy client data.
pub fn working_hours_map(rows: &[WorkingHour]) -> WorkingHours {
    let mut map: WorkingHours = BTreeMap::new();
    for row in rows {
        if !(0..=6).contains(&row.day_of_week) {
            continue;
        }
        let Some(interval) = Interval::from_clocks(&row.start_clock, &row.end_clock) else {
            continue;
        };
        map.entry(row.day_of_week as u8).or_default().push(interval);
    }
    for intervals in map.values_mut() {
        intervals.sort_by_key(|iv| iv.start_min);
    }
    map
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub total_sessions: i64,
    pub session_duration_min: i64,
    /// Raw recurrence JSON as the client sent it; cleaned through
    /// [`pattern::parse_patterns`] every time it is read.
    pub recurrence_json: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Package {
    /// The normalized in-memory form used by the scheduling engine.
    pub fn descriptor(&self) -> PackageDescriptor {
        let patterns = serde_json::from_str::<serde_json::Value>(&self.recurrence_json)
            .map(|v| pattern::parse_patterns(&v))
            .unwrap_or_default();
        PackageDescriptor {
            total_sessions: self.total_sessions.max(0) as u32,
            session_duration_min: self.session_duration_min.max(0) as u32,
            patterns,
        }
    }
}

/// What the engine needs to know about a package, stored or drafted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub total_sessions: u32,
    pub session_duration_min: u32,
    pub patterns: Vec<WeekdayPattern>,
}

/// The materialized unit of bookable time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Slot {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub package_id: Option<Uuid>,
    /// Groups slots generated from one package+pattern combination
    /// (`"{package_id}:{pattern_key}"`), so a series can be bulk-modified.
    pub series_id: Option<String>,
    pub kind: SlotKind,
    pub status: SlotStatus,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub modes: DeliveryModes,
    pub capacity: i64,
    pub hold_booking_id: Option<Uuid>,
    pub hold_until: Option<NaiveDateTime>,
    pub booked_by_booking: Option<Uuid>,
    /// Retention anchor: the row is eligible for purge once this passes.
    pub expires_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Slot {
    pub fn duration_min(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// View of a persisted slot in preview form, so a stored series can be
    /// run back through carry-forward. The pattern is recovered from the
    /// series key; a slot without one falls back to its own weekday.
    pub fn to_preview(&self) -> PreviewSlot {
        let pattern = self
            .series_id
            .as_deref()
            .and_then(|sid| sid.rsplit(':').next())
            .and_then(|key| {
                WeekdayPattern::normalize(
                    key.split('-').filter_map(|d| d.parse::<i64>().ok()),
                )
            })
            .or_else(|| {
                WeekdayPattern::normalize([i64::from(pattern::weekday_of(
                    self.start_time.date(),
                ))])
            })
            .expect("a single in-range weekday always normalizes");

        let start = self.start_time;
        let end = self.end_time;
        PreviewSlot {
            date: start.date(),
            start_clock: start.format("%H:%M").to_string(),
            end_clock: end.format("%H:%M").to_string(),
            pattern,
            start_time: start,
            end_time: end,
            status: Some(self.status),
            origin: SlotOrigin::Original,
        }
    }
}

/// Whether a preview entry came out of the generator as-is or was relocated
/// by carry-forward. An explicit variant, not a flag, so renderers get a
/// clean discriminated union.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotOrigin {
    Original,
    Carried,
}

/// One candidate slot of a schedule preview, purely in-memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewSlot {
    pub date: NaiveDate,
    pub start_clock: String,
    pub end_clock: String,
    pub pattern: WeekdayPattern,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Status of the backing slot when previewing a persisted series;
    /// `None` for freshly generated candidates.
    pub status: Option<SlotStatus>,
    pub origin: SlotOrigin,
}

impl PreviewSlot {
    pub fn duration_min(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Unclaimed means no status yet, or a status that leaves the slot
    /// available (OPEN, RESERVED_FOR_PACKAGE).
    pub fn is_unclaimed(&self) -> bool {
        self.status.map_or(true, SlotStatus::is_unclaimed)
    }

    pub fn is_carried(&self) -> bool {
        self.origin == SlotOrigin::Carried
    }
}

// ============================================================================
// Data Transfer Objects
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewTrainerData {
    pub display_name: String,
    pub default_break_min: i64,
    /// IANA timezone; validated on insert, defaults to UTC.
    pub timezone: Option<String>,
    pub modes: DeliveryModes,
}

impl Default for NewTrainerData {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            default_break_min: 0,
            timezone: None,
            modes: DeliveryModes::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPackageData {
    pub trainer_id: Uuid,
    pub name: String,
    pub total_sessions: i64,
    pub session_duration_min: i64,
    pub patterns: Vec<WeekdayPattern>,
}

/// A slot row ready for the duplicate-tolerant bulk insert.
#[derive(Debug, Clone)]
pub struct NewSlot {
    pub trainer_id: Uuid,
    pub package_id: Option<Uuid>,
    pub series_id: Option<String>,
    pub kind: SlotKind,
    pub status: SlotStatus,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub modes: DeliveryModes,
    pub capacity: i64,
    pub expires_at: Option<NaiveDateTime>,
}

/// Result of a Generate run: how many candidates the pipeline produced and
/// how many were genuinely new at the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerateOutcome {
    pub requested: usize,
    pub inserted: u64,
}

/// Returns the current UTC instant as a naive timestamp, for row metadata.
pub fn utc_now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}
