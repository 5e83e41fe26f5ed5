use anyhow::Result;
use chrono::{Duration, Utc};
use dialoguer::Confirm;
use fitsched_core::models::utc_now_naive;
use fitsched_core::repository::SlotRepository;
use owo_colors::OwoColorize;

use crate::cli::{SlotsListCommand, SlotsPurgeCommand};
use crate::util::{parse_base_date, parse_id};
use crate::views::table::display_slots;

pub async fn list_slots(repo: &impl SlotRepository, command: SlotsListCommand) -> Result<()> {
    let trainer_id = parse_id(&command.trainer)?;
    let today = Utc::now().date_naive();

    let from = match &command.from {
        Some(raw) => parse_base_date(raw)?,
        None => today - Duration::days(7),
    };
    let to = match &command.to {
        Some(raw) => parse_base_date(raw)?,
        None => today + Duration::days(90),
    };

    let slots = repo
        .find_slots(
            trainer_id,
            from.and_hms_opt(0, 0, 0).unwrap(),
            to.and_hms_opt(23, 59, 59).unwrap(),
        )
        .await?;
    display_slots(&slots);
    Ok(())
}

pub async fn release_holds(repo: &impl SlotRepository) -> Result<()> {
    let released = repo.release_expired_holds(utc_now_naive()).await?;
    println!("{} Released {} expired hold(s)", "✓".green().bold(), released);
    Ok(())
}

pub async fn purge(repo: &impl SlotRepository, command: SlotsPurgeCommand) -> Result<()> {
    if !command.force {
        let confirmed = Confirm::new()
            .with_prompt("Delete all slots past their retention window?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Purge cancelled.");
            return Ok(());
        }
    }

    let purged = repo.purge_expired_slots(utc_now_naive()).await?;
    println!("{} Purged {} expired slot(s)", "✓".green().bold(), purged);
    Ok(())
}
