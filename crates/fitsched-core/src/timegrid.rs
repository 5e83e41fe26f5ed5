//! Wall-clock arithmetic and working-interval slicing.
//!
//! Times of day travel as "HH:MM" strings at the boundary and as minute
//! offsets internally. All datetimes here are trainer-local naive wall
//! clock; keeping the calendar date separate from any UTC conversion is
//! what makes the generated dates immune to timezone drift.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parses a 24-hour "HH:MM" string into a minute offset from midnight.
pub fn parse_clock(clock: &str) -> Option<u16> {
    let (h, m) = clock.split_once(':')?;
    let hours: u16 = h.trim().parse().ok()?;
    let minutes: u16 = m.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats a minute offset back into "HH:MM".
pub fn format_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Combines a calendar date with a minute-of-day offset.
pub fn at_minutes(date: NaiveDate, minutes: u16) -> NaiveDateTime {
    let time = NaiveTime::from_num_seconds_from_midnight_opt(u32::from(minutes) * 60, 0)
        .unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// A half-open working interval `[start, end)` in minutes from midnight.
/// Invariant: `start < end`; rows violating it are filtered on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start_min: u16,
    pub end_min: u16,
}

impl Interval {
    pub fn new(start_min: u16, end_min: u16) -> Option<Self> {
        if start_min < end_min && end_min <= MINUTES_PER_DAY {
            Some(Self { start_min, end_min })
        } else {
            None
        }
    }

    /// Parses an interval from two "HH:MM" strings.
    pub fn from_clocks(start: &str, end: &str) -> Option<Self> {
        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }
}

/// Greedily slices a working interval into session blocks.
///
/// The first block starts at the interval start; each next block starts at
/// the previous start plus session length plus break. Blocks are emitted
/// while they fit entirely inside the interval — leftover time shorter than
/// a session is dropped silently, which is the expected common case.
pub fn slice_interval(interval: Interval, session_min: u16, break_min: u16) -> Vec<Interval> {
    let mut blocks = Vec::new();
    if session_min == 0 {
        return blocks;
    }

    let mut cursor = interval.start_min;
    while cursor + session_min <= interval.end_min {
        blocks.push(Interval {
            start_min: cursor,
            end_min: cursor + session_min,
        });
        cursor += session_min + break_min;
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round() {
        assert_eq!(parse_clock("07:00"), Some(420));
        assert_eq!(parse_clock("23:59"), Some(1439));
        assert_eq!(parse_clock("00:00"), Some(0));
        assert_eq!(format_clock(450), "07:30");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("12:60"), None);
        assert_eq!(parse_clock("noon"), None);
        assert_eq!(parse_clock("7"), None);
    }

    #[test]
    fn interval_requires_start_before_end() {
        assert!(Interval::new(480, 480).is_none());
        assert!(Interval::new(540, 480).is_none());
        assert!(Interval::from_clocks("07:00", "09:00").is_some());
    }

    #[test]
    fn slice_fills_interval_greedily() {
        // 07:00-09:00, 60-minute sessions, no break: two blocks.
        let iv = Interval::from_clocks("07:00", "09:00").unwrap();
        let blocks = slice_interval(iv, 60, 0);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Interval::new(420, 480).unwrap());
        assert_eq!(blocks[1], Interval::new(480, 540).unwrap());
    }

    #[test]
    fn slice_respects_breaks() {
        // 08:00-12:00, 60-minute sessions, 30-minute break:
        // 08:00, 09:30, 11:00 — the 12:30 block would overflow.
        let iv = Interval::from_clocks("08:00", "12:00").unwrap();
        let blocks = slice_interval(iv, 60, 30);
        let starts: Vec<u16> = blocks.iter().map(|b| b.start_min).collect();
        assert_eq!(starts, vec![480, 570, 660]);
    }

    #[test]
    fn slice_drops_short_leftover() {
        // 07:00-08:30 with 60-minute sessions: one block, 30 minutes lost.
        let iv = Interval::from_clocks("07:00", "08:30").unwrap();
        assert_eq!(slice_interval(iv, 60, 0).len(), 1);

        // Interval shorter than a session: nothing.
        let tight = Interval::from_clocks("07:00", "07:45").unwrap();
        assert!(slice_interval(tight, 60, 0).is_empty());
    }

    #[test]
    fn slice_zero_session_yields_nothing() {
        let iv = Interval::from_clocks("07:00", "09:00").unwrap();
        assert!(slice_interval(iv, 0, 15).is_empty());
    }

    #[test]
    fn blocks_never_overlap_and_stay_inside() {
        let iv = Interval::from_clocks("06:15", "21:40").unwrap();
        let blocks = slice_interval(iv, 45, 10);
        for pair in blocks.windows(2) {
            assert!(pair[0].end_min <= pair[1].start_min);
        }
        for block in &blocks {
            assert!(block.start_min >= iv.start_min && block.end_min <= iv.end_min);
        }
    }
}
