//! The two boundary operations of the scheduling core: Preview (pure
//! computation, no side effect) and Generate (Preview plus a
//! duplicate-tolerant commit of the resulting slots).

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::carryforward::carry_forward;
use crate::error::CoreError;
use crate::models::{
    working_hours_map, GenerateOutcome, NewSlot, Package, PackageDescriptor, PreviewSlot,
    SlotKind, SlotStatus, TrainerProfile,
};
use crate::recurrence::build_preview;
use crate::repository::{PackageRepository, SlotRepository, TrainerRepository};
use crate::timezone::local_now;

/// Where the package descriptor comes from: a stored package, or an inline
/// draft a trainer is still editing. Drafts can be previewed but not
/// generated — an unsaved package has no id to anchor a series to.
#[derive(Debug, Clone)]
pub enum PackageSource {
    Stored(Uuid),
    Draft {
        trainer_id: Uuid,
        descriptor: PackageDescriptor,
    },
}

#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub package: PackageSource,
    /// Defaults to today in the trainer's timezone.
    pub base_date: Option<NaiveDate>,
    pub carry_forward: bool,
    pub spread_weekly: bool,
}

impl ScheduleRequest {
    pub fn new(package: PackageSource) -> Self {
        Self {
            package,
            base_date: None,
            carry_forward: true,
            spread_weekly: false,
        }
    }
}

struct Resolved {
    trainer: TrainerProfile,
    descriptor: PackageDescriptor,
    package: Option<Package>,
}

async fn resolve<R>(repo: &R, request: &ScheduleRequest) -> Result<Resolved, CoreError>
where
    R: TrainerRepository + PackageRepository + Sync,
{
    let (trainer_id, descriptor, package) = match &request.package {
        PackageSource::Stored(package_id) => {
            let package = repo
                .find_package_by_id(*package_id)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("Package {package_id} not found")))?;
            (package.trainer_id, package.descriptor(), Some(package))
        }
        PackageSource::Draft {
            trainer_id,
            descriptor,
        } => (*trainer_id, descriptor.clone(), None),
    };

    let trainer = repo
        .find_trainer_by_id(trainer_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Trainer profile {trainer_id} not found")))?;

    Ok(Resolved {
        trainer,
        descriptor,
        package,
    })
}

async fn build_slots<R>(
    repo: &R,
    request: &ScheduleRequest,
    resolved: &Resolved,
) -> Result<Vec<PreviewSlot>, CoreError>
where
    R: TrainerRepository + Sync,
{
    let trainer = &resolved.trainer;
    let rows = repo.find_working_hours(trainer.id).await?;
    let hours = working_hours_map(&rows);

    let now = local_now(&trainer.timezone)?;
    let base = request.base_date.unwrap_or_else(|| now.date());
    let break_min = u16::try_from(trainer.default_break_min.max(0)).unwrap_or(u16::MAX);

    let mut slots = build_preview(&resolved.descriptor, &hours, break_min, base);
    if request.carry_forward {
        slots = carry_forward(slots, now, request.spread_weekly);
    }
    Ok(slots)
}

/// Computes the ordered candidate slot list for a package without touching
/// the slot store. Carry-forward runs by default and relocates any
/// stale-but-unclaimed slots opportunistically.
pub async fn preview_schedule<R>(
    repo: &R,
    request: &ScheduleRequest,
) -> Result<Vec<PreviewSlot>, CoreError>
where
    R: TrainerRepository + PackageRepository + Sync,
{
    let resolved = resolve(repo, request).await?;
    build_slots(repo, request, &resolved).await
}

/// Runs the Preview pipeline and persists the outcome as OPEN slots.
///
/// Candidates whose `(trainer, start_time)` already exists are skipped by
/// the store, so re-running Generate after a partial failure (or
/// concurrently) never duplicates slots; the returned count covers only
/// genuinely-new rows. Producing zero candidates is a business-rule
/// rejection, not a success with an empty write.
pub async fn generate_schedule<R>(
    repo: &R,
    request: &ScheduleRequest,
) -> Result<GenerateOutcome, CoreError>
where
    R: TrainerRepository + PackageRepository + SlotRepository + Sync,
{
    let resolved = resolve(repo, request).await?;
    let package = resolved.package.as_ref().ok_or_else(|| {
        CoreError::InvalidInput(
            "Generate requires a stored package; drafts can only be previewed.".to_string(),
        )
    })?;

    let slots = build_slots(repo, request, &resolved).await?;
    if slots.is_empty() {
        return Err(CoreError::NoSlotsGenerated);
    }

    let trainer = &resolved.trainer;
    let candidates: Vec<NewSlot> = slots
        .iter()
        .map(|slot| NewSlot {
            trainer_id: trainer.id,
            package_id: Some(package.id),
            series_id: Some(format!("{}:{}", package.id, slot.pattern.key())),
            kind: SlotKind::Recurring,
            status: SlotStatus::Open,
            start_time: slot.start_time,
            end_time: slot.end_time,
            modes: trainer.modes,
            capacity: 1,
            // Retention anchor: purgeable one hour after the slot ends.
            expires_at: Some(slot.end_time + Duration::hours(1)),
        })
        .collect();

    let inserted = repo.insert_new_slots(&candidates).await?;
    Ok(GenerateOutcome {
        requested: candidates.len(),
        inserted,
    })
}
