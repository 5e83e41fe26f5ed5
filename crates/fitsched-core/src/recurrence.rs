//! Occurrence expansion: from a weekday pattern to concrete calendar dates,
//! and from a package + working hours to a full candidate slot list.
//!
//! Everything here is pure and synchronous — no clock reads, no storage.
//! The same inputs always produce the same ordered output, which is what
//! makes regeneration idempotent at the persistence layer.

use chrono::{Days, NaiveDate};

use crate::models::{PackageDescriptor, PreviewSlot, SlotOrigin, WorkingHours};
use crate::pattern::{weekday_of, WeekdayPattern};
use crate::timegrid::{at_minutes, format_clock, slice_interval};

/// Enumerates exactly `total` calendar dates matching `pattern`, searching
/// forward from `base` (inclusive).
///
/// The walk is anchored week by week: for each pattern weekday, in
/// Monday-first order, the forward-only offset `(dow - anchor_dow + 7) % 7`
/// from the current anchor gives the date; once the week's weekdays are
/// exhausted the anchor advances by exactly 7 days. Each non-empty pattern
/// contributes at least one date per week, so the loop is bounded by
/// `total` week hops — the bound is enforced rather than assumed.
///
/// An empty pattern or `total == 0` yields an empty list, not an error.
pub fn generate_dates(base: NaiveDate, pattern: &WeekdayPattern, total: u32) -> Vec<NaiveDate> {
    let total = total as usize;
    let mut result = Vec::with_capacity(total);
    if pattern.is_empty() || total == 0 {
        return result;
    }

    let mut anchor = base;
    let mut weeks = 0usize;
    while result.len() < total && weeks <= total {
        let anchor_dow = weekday_of(anchor);
        for &dow in pattern.days() {
            let diff = (u32::from(dow) + 7 - u32::from(anchor_dow)) % 7;
            let next = anchor + Days::new(u64::from(diff));
            if next >= base {
                result.push(next);
            }
            if result.len() >= total {
                break;
            }
        }
        anchor = anchor + Days::new(7);
        weeks += 1;
    }

    result
}

/// Builds the full ordered candidate list for a package: every pattern is
/// expanded to `total_sessions` dates, each date is matched against the
/// trainer's working hours for its weekday, and every open interval is
/// sliced into session blocks.
///
/// A date whose weekday has no working-hours entry contributes zero slots;
/// the total then falls below `total_sessions` and is not compensated by
/// extending the date range. Callers that care compare the returned length
/// against the package size.
pub fn build_preview(
    descriptor: &PackageDescriptor,
    hours: &WorkingHours,
    break_min: u16,
    base: NaiveDate,
) -> Vec<PreviewSlot> {
    let mut preview = Vec::new();
    let session_min = match u16::try_from(descriptor.session_duration_min) {
        Ok(m) if m > 0 => m,
        _ => return preview,
    };

    for pattern in &descriptor.patterns {
        let dates = generate_dates(base, pattern, descriptor.total_sessions);

        for date in dates {
            let dow = weekday_of(date);
            let Some(intervals) = hours.get(&dow) else {
                continue;
            };

            for interval in intervals {
                for block in slice_interval(*interval, session_min, break_min) {
                    preview.push(PreviewSlot {
                        date,
                        start_clock: format_clock(block.start_min),
                        end_clock: format_clock(block.end_min),
                        pattern: pattern.clone(),
                        start_time: at_minutes(date, block.start_min),
                        end_time: at_minutes(date, block.end_min),
                        status: None,
                        origin: SlotOrigin::Original,
                    });
                }
            }
        }
    }

    preview.sort_by_key(|slot| slot.start_time);
    preview
}
