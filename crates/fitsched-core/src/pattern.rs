//! Weekday recurrence patterns.
//!
//! Weekdays are indexed 0..=6 with 0 = Sunday, matching what clients send.
//! For iteration and display the canonical order is Monday-first
//! (`[1, 2, 3, 4, 5, 6, 0]`) so generated schedules read "week starts
//! Monday"; the ordering has no effect on which dates get chosen.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

/// Monday-first weekday ordering used for pattern iteration.
pub const MON_FIRST_ORDER: [u8; 7] = [1, 2, 3, 4, 5, 6, 0];

fn order_index(day: u8) -> usize {
    MON_FIRST_ORDER
        .iter()
        .position(|&d| d == day)
        .unwrap_or(MON_FIRST_ORDER.len())
}

/// Weekday index (0 = Sunday) of a calendar date.
pub fn weekday_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// A cleaned set of weekday indices, held in Monday-first order.
///
/// Construction always goes through [`WeekdayPattern::normalize`], so a
/// pattern in hand is deduplicated, range-checked and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeekdayPattern(Vec<u8>);

impl WeekdayPattern {
    /// Cleans arbitrary numeric input into a pattern: coerce, drop values
    /// outside 0..=6, deduplicate, sort Monday-first. Returns `None` when
    /// nothing valid remains — empty patterns are meaningless and callers
    /// must not see them.
    pub fn normalize<I>(days: I) -> Option<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut cleaned: Vec<u8> = days
            .into_iter()
            .filter(|d| (0..=6).contains(d))
            .map(|d| d as u8)
            .collect();
        cleaned.sort_by_key(|&d| order_index(d));
        cleaned.dedup();
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// Weekdays in Monday-first order.
    pub fn days(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, day: u8) -> bool {
        self.0.contains(&day)
    }

    /// Stable lookup key: ascending numeric indices joined by `-`
    /// (e.g. `"1-3-5"`). Two patterns are equal iff their keys are equal;
    /// series identifiers embed this key.
    pub fn key(&self) -> String {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        sorted
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl std::fmt::Display for WeekdayPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for WeekdayPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for WeekdayPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<i64>::deserialize(deserializer)?;
        WeekdayPattern::normalize(raw)
            .ok_or_else(|| serde::de::Error::custom("weekday pattern is empty after cleaning"))
    }
}

/// Parses client-supplied recurrence JSON into patterns.
///
/// Accepts either a flat array of numbers (`[1,3,5]`, auto-wrapped into a
/// single pattern) or an array of arrays (`[[1,3,5],[2,4,6]]`). Non-numeric
/// entries and out-of-range weekdays are dropped; patterns left empty are
/// filtered out. Malformed input yields an empty list, never an error —
/// this is the single coercion point at the edge, everything downstream
/// takes `&[WeekdayPattern]`.
pub fn parse_patterns(value: &serde_json::Value) -> Vec<WeekdayPattern> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let nested = items.iter().any(|v| v.is_array());
    let groups: Vec<Vec<i64>> = if nested {
        items
            .iter()
            .filter_map(|v| v.as_array())
            .map(|inner| inner.iter().filter_map(coerce_day).collect())
            .collect()
    } else {
        vec![items.iter().filter_map(coerce_day).collect()]
    };

    groups
        .into_iter()
        .filter_map(WeekdayPattern::normalize)
        .collect()
}

fn coerce_day(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    // Tolerate numbers that arrive as strings ("3"), a common client quirk.
    value.as_str().and_then(|s| s.trim().parse().ok())
}
