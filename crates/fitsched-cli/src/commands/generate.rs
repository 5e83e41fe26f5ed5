use anyhow::Result;
use fitsched_core::repository::{PackageRepository, SlotRepository, TrainerRepository};
use fitsched_core::schedule::{generate_schedule, PackageSource, ScheduleRequest};
use owo_colors::OwoColorize;

use crate::cli::GenerateCommand;
use crate::util::{parse_base_date, parse_id};

pub async fn generate<R>(repo: &R, command: GenerateCommand) -> Result<()>
where
    R: TrainerRepository + PackageRepository + SlotRepository + Sync,
{
    let package_id = parse_id(&command.package)?;

    let mut request = ScheduleRequest::new(PackageSource::Stored(package_id));
    request.base_date = command.start.as_deref().map(parse_base_date).transpose()?;
    request.carry_forward = !command.no_carry_forward;
    request.spread_weekly = command.spread_weekly;

    let outcome = generate_schedule(repo, &request).await?;

    println!(
        "{} Created {} slot(s)",
        "✓".green().bold(),
        outcome.inserted.to_string().bold()
    );
    if outcome.inserted < outcome.requested as u64 {
        // The duplicate-tolerant insert skipped candidates that already
        // exist; routine when regenerating.
        println!(
            "  {} of {} candidates already existed and were skipped",
            outcome.requested as u64 - outcome.inserted,
            outcome.requested
        );
    }
    Ok(())
}
