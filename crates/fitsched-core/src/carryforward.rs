//! Carry-forward reconciliation for stale, unclaimed slots.
//!
//! A slot whose time has passed while nobody booked it must not vanish from
//! a regenerated schedule — the student already paid for that session. The
//! reconciler relocates every such slot to the next future occurrence of
//! its original weekday, past the end of the surviving schedule, keeping
//! its time-of-day and duration intact.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::models::{PreviewSlot, SlotOrigin};
use crate::pattern::weekday_of;

/// First date strictly after `day` that falls on weekday `dow`.
/// Strictly after, never equal: landing on the anchor date itself could
/// collide with a slot that is already kept there.
fn next_date_with_dow_after(day: NaiveDate, dow: u8) -> NaiveDate {
    let mut d = day + Days::new(1);
    while weekday_of(d) != dow {
        d = d + Days::new(1);
    }
    d
}

/// Relocates past-and-unclaimed slots to the end of the schedule.
///
/// Slots are partitioned into kept (still upcoming, or already claimed) and
/// carry candidates (`end_time <= now` and unclaimed), the candidates
/// grouped by the weekday of their original start. Each group is moved to
/// the first occurrence of its weekday strictly after the last kept date
/// (or after `now` when nothing is kept). With `spread_weekly` the target
/// advances a week per relocated slot, fanning the group out; without it
/// the whole group lands on one date, differing only by time-of-day.
///
/// The slot count is conserved and carried slots come back tagged
/// [`SlotOrigin::Carried`]. Repeated invocation with the same `now` is a
/// fixed point; with an advancing clock it keeps carrying newly stale
/// slots forward, which is the intended opportunistic behavior.
pub fn carry_forward(
    slots: Vec<PreviewSlot>,
    now: NaiveDateTime,
    spread_weekly: bool,
) -> Vec<PreviewSlot> {
    if slots.is_empty() {
        return slots;
    }

    let mut kept: Vec<PreviewSlot> = Vec::new();
    let mut to_carry: BTreeMap<u8, Vec<PreviewSlot>> = BTreeMap::new();

    for slot in slots {
        let is_past = slot.end_time <= now;
        if is_past && slot.is_unclaimed() {
            to_carry
                .entry(weekday_of(slot.start_time.date()))
                .or_default()
                .push(slot);
        } else {
            kept.push(slot);
        }
    }

    if to_carry.is_empty() {
        return kept;
    }

    kept.sort_by_key(|s| s.start_time);
    let last_date = kept
        .last()
        .map(|s| s.start_time.date())
        .unwrap_or_else(|| now.date());

    let mut result = kept;

    for (dow, mut group) in to_carry {
        // Same-weekday slots keep their relative time-of-day ordering.
        group.sort_by_key(|s| s.start_time);

        let mut target = next_date_with_dow_after(last_date, dow);

        for slot in group {
            let duration = slot.end_time - slot.start_time;
            let new_start = target.and_time(slot.start_time.time());
            let new_end = new_start + duration;

            result.push(PreviewSlot {
                date: target,
                start_time: new_start,
                end_time: new_end,
                origin: SlotOrigin::Carried,
                ..slot
            });

            if spread_weekly {
                target = target + Days::new(7);
            }
        }
    }

    result.sort_by_key(|s| s.start_time);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotStatus, WorkingHours};
    use crate::pattern::WeekdayPattern;
    use crate::recurrence::build_preview;
    use crate::timegrid::Interval;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(d: NaiveDate, start: &str, end: &str, status: Option<SlotStatus>) -> PreviewSlot {
        let start_min = crate::timegrid::parse_clock(start).unwrap();
        let end_min = crate::timegrid::parse_clock(end).unwrap();
        PreviewSlot {
            date: d,
            start_clock: start.to_string(),
            end_clock: end.to_string(),
            pattern: WeekdayPattern::normalize([i64::from(weekday_of(d))]).unwrap(),
            start_time: crate::timegrid::at_minutes(d, start_min),
            end_time: crate::timegrid::at_minutes(d, end_min),
            status,
            origin: SlotOrigin::Original,
        }
    }

    #[test]
    fn next_dow_is_strictly_after() {
        // From a Friday, the next Friday is a week out, not the same day.
        let friday = date(2026, 3, 6);
        assert_eq!(next_date_with_dow_after(friday, 5), date(2026, 3, 13));
        assert_eq!(next_date_with_dow_after(friday, 1), date(2026, 3, 9));
        assert_eq!(next_date_with_dow_after(friday, 6), date(2026, 3, 7));
    }

    #[test]
    fn stale_open_slot_moves_past_the_kept_anchor() {
        // Stale Monday 07:00 slot, kept Friday slot ahead of it. The stale
        // one lands on the Monday strictly after the Friday anchor.
        let now = date(2026, 3, 11).and_hms_opt(12, 0, 0).unwrap();
        let stale = slot(date(2026, 3, 2), "07:00", "08:00", Some(SlotStatus::Open));
        let kept = slot(date(2026, 3, 13), "07:00", "08:00", Some(SlotStatus::Open));

        let out = carry_forward(vec![stale, kept], now, false);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date, date(2026, 3, 13));
        assert_eq!(out[0].origin, SlotOrigin::Original);
        assert_eq!(out[1].date, date(2026, 3, 16));
        assert_eq!(out[1].origin, SlotOrigin::Carried);
        assert_eq!(out[1].start_clock, "07:00");
        assert_eq!(out[1].duration_min(), 60);
    }

    #[test]
    fn booked_past_slots_stay_put() {
        let now = date(2026, 3, 11).and_hms_opt(12, 0, 0).unwrap();
        let past_booked = slot(date(2026, 3, 2), "07:00", "08:00", Some(SlotStatus::Booked));
        let past_held = slot(date(2026, 3, 3), "07:00", "08:00", Some(SlotStatus::Held));

        let out = carry_forward(vec![past_booked.clone(), past_held.clone()], now, false);
        assert_eq!(out, vec![past_booked, past_held]);
    }

    #[test]
    fn nothing_to_carry_returns_input_untouched() {
        let now = date(2026, 3, 2).and_hms_opt(6, 0, 0).unwrap();
        let upcoming = vec![
            slot(date(2026, 3, 2), "07:00", "08:00", None),
            slot(date(2026, 3, 4), "07:00", "08:00", None),
        ];
        assert_eq!(carry_forward(upcoming.clone(), now, false), upcoming);
    }

    #[test]
    fn count_is_conserved_and_no_start_collides() {
        let now = date(2026, 3, 12).and_hms_opt(0, 0, 0).unwrap();
        let slots = vec![
            slot(date(2026, 3, 2), "07:00", "08:00", Some(SlotStatus::Open)),
            slot(date(2026, 3, 2), "08:00", "09:00", Some(SlotStatus::Open)),
            slot(date(2026, 3, 4), "07:00", "08:00", Some(SlotStatus::Booked)),
            slot(date(2026, 3, 13), "07:00", "08:00", Some(SlotStatus::Open)),
        ];

        let out = carry_forward(slots.clone(), now, false);
        assert_eq!(out.len(), slots.len());

        let mut starts: Vec<NaiveDateTime> = out.iter().map(|s| s.start_time).collect();
        starts.sort();
        starts.dedup();
        assert_eq!(starts.len(), out.len());
    }

    #[test]
    fn same_weekday_group_shares_target_without_spread() {
        // Two stale Monday slots, nothing kept: both land on the Monday
        // after "now", distinguished only by their clock times.
        let now = date(2026, 3, 12).and_hms_opt(0, 0, 0).unwrap();
        let slots = vec![
            slot(date(2026, 3, 2), "07:00", "08:00", None),
            slot(date(2026, 3, 2), "08:00", "09:00", None),
        ];

        let out = carry_forward(slots, now, false);
        assert_eq!(out[0].date, date(2026, 3, 16));
        assert_eq!(out[1].date, date(2026, 3, 16));
        assert_eq!(out[0].start_clock, "07:00");
        assert_eq!(out[1].start_clock, "08:00");
    }

    #[test]
    fn spread_weekly_fans_the_group_out() {
        let now = date(2026, 3, 12).and_hms_opt(0, 0, 0).unwrap();
        let slots = vec![
            slot(date(2026, 3, 2), "07:00", "08:00", None),
            slot(date(2026, 3, 2), "08:00", "09:00", None),
        ];

        let out = carry_forward(slots, now, true);
        assert_eq!(out[0].date, date(2026, 3, 16));
        assert_eq!(out[1].date, date(2026, 3, 23));
    }

    #[test]
    fn reconciliation_is_a_fixed_point_for_a_frozen_clock() {
        let now = date(2026, 3, 12).and_hms_opt(0, 0, 0).unwrap();
        let slots = vec![
            slot(date(2026, 3, 2), "07:00", "08:00", Some(SlotStatus::Open)),
            slot(date(2026, 3, 13), "07:00", "08:00", Some(SlotStatus::Open)),
        ];

        let once = carry_forward(slots, now, false);
        let twice = carry_forward(once.clone(), now, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn preview_pipeline_carries_stale_slots() {
        // End-to-end over the generator output: base date two weeks back,
        // everything before "now" gets pushed past the newest kept slot.
        let mut hours: WorkingHours = std::collections::BTreeMap::new();
        hours.insert(1, vec![Interval::from_clocks("07:00", "09:00").unwrap()]);

        let descriptor = crate::models::PackageDescriptor {
            total_sessions: 3,
            session_duration_min: 60,
            patterns: vec![WeekdayPattern::normalize([1]).unwrap()],
        };
        let preview = build_preview(&descriptor, &hours, 0, date(2026, 3, 2));
        assert_eq!(preview.len(), 6);

        let now = date(2026, 3, 10).and_hms_opt(0, 0, 0).unwrap();
        let out = carry_forward(preview, now, false);

        assert_eq!(out.len(), 6);
        let carried: Vec<_> = out.iter().filter(|s| s.is_carried()).collect();
        // Mar 2 and Mar 9 slots are stale, Mar 16 survives.
        assert_eq!(carried.len(), 4);
        assert!(carried.iter().all(|s| s.date == date(2026, 3, 23)));
        assert!(out.iter().all(|s| !s.is_carried() || s.start_time > now));
    }
}
