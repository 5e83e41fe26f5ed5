use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use fitsched_core::models::{Package, PreviewSlot, Slot, SlotStatus};
use fitsched_core::pattern::weekday_of;

use crate::util::weekday_name;

pub fn display_preview(slots: &[PreviewSlot]) {
    if slots.is_empty() {
        println!("No slots to show.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Day", "Start", "End", "Pattern", ""]);

    for slot in slots {
        let mut row = Row::new();
        row.add_cell(Cell::new(slot.date.to_string()));
        row.add_cell(Cell::new(weekday_name(weekday_of(slot.date))));
        row.add_cell(Cell::new(&slot.start_clock));
        row.add_cell(Cell::new(&slot.end_clock));

        let pattern_label = slot
            .pattern
            .days()
            .iter()
            .map(|&d| weekday_name(d))
            .collect::<Vec<_>>()
            .join("/");
        row.add_cell(Cell::new(pattern_label));

        if slot.is_carried() {
            row.add_cell(
                Cell::new("↻ carried")
                    .fg(Color::Yellow)
                    .add_attribute(Attribute::Bold),
            );
        } else {
            row.add_cell(Cell::new(""));
        }
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_slots(slots: &[Slot]) {
    if slots.is_empty() {
        println!("No slots found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Start", "When", "Status", "Kind", "Series"]);

    for slot in slots {
        let mut row = Row::new();
        row.add_cell(Cell::new(&slot.id.to_string()[..8]));
        row.add_cell(Cell::new(
            slot.start_time.format("%Y-%m-%d %H:%M").to_string(),
        ));
        row.add_cell(Cell::new(
            (slot.start_time - fitsched_core::models::utc_now_naive()).humanize(),
        ));

        let mut status_cell = Cell::new(slot.status.to_string());
        status_cell = match slot.status {
            SlotStatus::Booked => status_cell.fg(Color::Green),
            SlotStatus::Held => status_cell.fg(Color::Yellow),
            SlotStatus::Blocked => status_cell.fg(Color::DarkGrey),
            SlotStatus::Open | SlotStatus::ReservedForPackage => status_cell,
        };
        row.add_cell(status_cell);

        row.add_cell(Cell::new(slot.kind.to_string()));
        row.add_cell(Cell::new(slot.series_id.as_deref().unwrap_or("-")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_packages(packages: &[Package]) {
    if packages.is_empty() {
        println!("No packages found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Sessions", "Duration", "Patterns", "Active"]);

    for package in packages {
        let descriptor = package.descriptor();
        let patterns = descriptor
            .patterns
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>()
            .join(" | ");

        let mut row = Row::new();
        row.add_cell(Cell::new(&package.id.to_string()[..8]));
        row.add_cell(Cell::new(&package.name));
        row.add_cell(Cell::new(package.total_sessions.to_string()));
        row.add_cell(Cell::new(format!("{} min", package.session_duration_min)));
        row.add_cell(Cell::new(patterns));
        row.add_cell(Cell::new(if package.is_active { "yes" } else { "no" }));
        table.add_row(row);
    }

    println!("{table}");
}
