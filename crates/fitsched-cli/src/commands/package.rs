use anyhow::{anyhow, Result};
use fitsched_core::models::NewPackageData;
use fitsched_core::pattern::WeekdayPattern;
use fitsched_core::repository::PackageRepository;
use owo_colors::OwoColorize;

use crate::cli::{PackageAddCommand, PackageListCommand};
use crate::util::{parse_id, parse_weekdays};
use crate::views::table::display_packages;

pub fn patterns_from_args(raw: &[String]) -> Result<Vec<WeekdayPattern>> {
    let patterns: Vec<WeekdayPattern> = raw
        .iter()
        .map(|arg| {
            parse_weekdays(arg).and_then(|days| {
                WeekdayPattern::normalize(days)
                    .ok_or_else(|| anyhow!("Pattern '{}' has no usable weekdays", arg))
            })
        })
        .collect::<Result<_>>()?;
    Ok(patterns)
}

pub async fn add_package(
    repo: &impl PackageRepository,
    command: PackageAddCommand,
) -> Result<()> {
    let trainer_id = parse_id(&command.trainer)?;
    let patterns = patterns_from_args(&command.patterns)?;

    let package = repo
        .add_package(NewPackageData {
            trainer_id,
            name: command.name,
            total_sessions: command.sessions,
            session_duration_min: command.duration,
            patterns,
        })
        .await?;

    println!(
        "{} Package '{}' created with ID {}",
        "✓".green().bold(),
        package.name.bold(),
        package.id.to_string().cyan()
    );
    println!(
        "  Next: {} to see its schedule",
        format!("fitsched preview --package {}", package.id).dimmed()
    );
    Ok(())
}

pub async fn list_packages(
    repo: &impl PackageRepository,
    command: PackageListCommand,
) -> Result<()> {
    let trainer_id = parse_id(&command.trainer)?;
    let packages = repo.find_packages_for_trainer(trainer_id).await?;
    display_packages(&packages);
    Ok(())
}
