use anyhow::{anyhow, Result};
use fitsched_core::models::PackageDescriptor;
use fitsched_core::repository::{PackageRepository, TrainerRepository};
use fitsched_core::schedule::{preview_schedule, PackageSource, ScheduleRequest};
use owo_colors::OwoColorize;

use crate::cli::PreviewCommand;
use crate::commands::package::patterns_from_args;
use crate::util::{parse_base_date, parse_id};
use crate::views::table::display_preview;

pub async fn preview<R>(repo: &R, command: PreviewCommand) -> Result<()>
where
    R: TrainerRepository + PackageRepository + Sync,
{
    let (source, expected) = resolve_source(repo, &command).await?;

    let mut request = ScheduleRequest::new(source);
    request.base_date = command.start.as_deref().map(parse_base_date).transpose()?;
    request.carry_forward = !command.no_carry_forward;
    request.spread_weekly = command.spread_weekly;

    let slots = preview_schedule(repo, &request).await?;
    display_preview(&slots);

    let carried = slots.iter().filter(|s| s.is_carried()).count();
    println!("{} slot(s), {} carried forward", slots.len(), carried);

    // A schedule can come up short when working hours skip pattern days;
    // surface it so the trainer can widen their hours.
    if let Some(expected) = expected {
        let dates: std::collections::BTreeSet<_> = slots.iter().map(|s| s.date).collect();
        if (dates.len() as i64) < expected {
            println!(
                "{} only {} of {} session dates have working hours",
                "warning:".yellow().bold(),
                dates.len(),
                expected
            );
        }
    }
    Ok(())
}

async fn resolve_source<R>(
    repo: &R,
    command: &PreviewCommand,
) -> Result<(PackageSource, Option<i64>)>
where
    R: PackageRepository + Sync,
{
    if let Some(package) = &command.package {
        let id = parse_id(package)?;
        let expected = repo
            .find_package_by_id(id)
            .await?
            .map(|p| p.total_sessions);
        return Ok((PackageSource::Stored(id), expected));
    }

    let trainer = command
        .trainer
        .as_deref()
        .ok_or_else(|| anyhow!("Provide --package, or --trainer with a draft descriptor"))?;
    let sessions = command
        .sessions
        .ok_or_else(|| anyhow!("Draft preview needs --sessions"))?;
    let duration = command
        .duration
        .ok_or_else(|| anyhow!("Draft preview needs --duration"))?;
    if command.patterns.is_empty() {
        return Err(anyhow!("Draft preview needs at least one --pattern"));
    }

    let source = PackageSource::Draft {
        trainer_id: parse_id(trainer)?,
        descriptor: PackageDescriptor {
            total_sessions: u32::try_from(sessions.max(0)).unwrap_or(0),
            session_duration_min: u32::try_from(duration.max(0)).unwrap_or(0),
            patterns: patterns_from_args(&command.patterns)?,
        },
    };
    Ok((source, Some(sessions)))
}
