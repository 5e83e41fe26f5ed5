use anyhow::Result;
use fitsched_core::models::{DeliveryModes, NewTrainerData};
use fitsched_core::repository::TrainerRepository;
use owo_colors::OwoColorize;

use crate::cli::{TrainerAddCommand, TrainerHoursCommand};
use crate::config::Config;
use crate::util::{parse_id, parse_weekdays};

pub async fn add_trainer(
    repo: &impl TrainerRepository,
    command: TrainerAddCommand,
    config: &Config,
) -> Result<()> {
    let timezone = command
        .timezone
        .or_else(|| Some(config.default_timezone.clone()));

    let trainer = repo
        .add_trainer(NewTrainerData {
            display_name: command.name,
            default_break_min: command.break_min,
            timezone,
            modes: DeliveryModes {
                at_pt_gym: !command.no_pt_gym,
                at_client: command.at_client,
                at_other_gym: command.at_other_gym,
            },
        })
        .await?;

    println!(
        "{} Trainer '{}' created with ID {}",
        "✓".green().bold(),
        trainer.display_name.bold(),
        trainer.id.to_string().cyan()
    );
    println!(
        "  Timezone {} · break {} min",
        trainer.timezone,
        trainer.default_break_min
    );
    println!(
        "  Next: {} to open weekly teaching windows",
        format!("fitsched trainer hours {} --day mon --from 07:00 --to 09:00", trainer.id).dimmed()
    );

    Ok(())
}

pub async fn add_hours(
    repo: &impl TrainerRepository,
    command: TrainerHoursCommand,
) -> Result<()> {
    let trainer_id = parse_id(&command.trainer)?;

    // One flag can name several days ("mon,wed,fri"): add the same
    // interval to each.
    let days = parse_weekdays(&command.day)?;
    for day in &days {
        repo.add_working_hours(trainer_id, *day, &command.from, &command.to)
            .await?;
    }

    println!(
        "{} Added {}-{} on {} day(s)",
        "✓".green().bold(),
        command.from,
        command.to,
        days.len()
    );
    Ok(())
}
