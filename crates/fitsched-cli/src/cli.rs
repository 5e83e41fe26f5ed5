use clap::{Parser, Subcommand};

/// Schedule management CLI for the Fitsched trainer marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage trainer profiles and working hours
    Trainer(TrainerCommand),
    /// Manage training packages
    Package(PackageCommand),
    /// Preview a schedule without saving anything
    Preview(PreviewCommand),
    /// Generate a schedule and persist its slots
    Generate(GenerateCommand),
    /// Inspect and maintain stored slots
    Slots(SlotsCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct TrainerCommand {
    #[command(subcommand)]
    pub action: TrainerAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TrainerAction {
    /// Register a trainer profile
    Add(TrainerAddCommand),
    /// Add a weekly working-hours interval
    Hours(TrainerHoursCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct TrainerAddCommand {
    /// Display name of the trainer
    pub name: String,
    /// Break between sessions, in minutes
    #[clap(long, default_value_t = 0)]
    pub break_min: i64,
    /// IANA timezone (defaults to the configured/system timezone)
    #[clap(long)]
    pub timezone: Option<String>,
    /// Trainer travels to the client's home gym
    #[clap(long)]
    pub at_client: bool,
    /// Trainer travels to a gym the client chooses
    #[clap(long)]
    pub at_other_gym: bool,
    /// Trainer does NOT teach at their own gym
    #[clap(long)]
    pub no_pt_gym: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TrainerHoursCommand {
    /// Trainer ID
    pub trainer: String,
    /// Weekday: mon..sun or 0..6 (0 = Sunday)
    #[clap(long)]
    pub day: String,
    /// Interval start, HH:MM
    #[clap(long)]
    pub from: String,
    /// Interval end, HH:MM
    #[clap(long)]
    pub to: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PackageCommand {
    #[command(subcommand)]
    pub action: PackageAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PackageAction {
    /// Create a package for a trainer
    Add(PackageAddCommand),
    /// List a trainer's packages
    List(PackageListCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct PackageAddCommand {
    /// Trainer ID
    pub trainer: String,
    /// Package name (unique per trainer)
    pub name: String,
    /// Total number of sessions in the package
    #[clap(long)]
    pub sessions: i64,
    /// Session duration in minutes
    #[clap(long)]
    pub duration: i64,
    /// Weekday pattern, e.g. "mon,wed,fri" or "1,3,5"; repeat for
    /// alternative patterns
    #[clap(long = "pattern", num_args = 1.., required = true)]
    pub patterns: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PackageListCommand {
    /// Trainer ID
    pub trainer: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// Stored package ID
    #[clap(long, conflicts_with_all = ["trainer", "sessions", "duration", "patterns"])]
    pub package: Option<String>,
    /// Trainer ID, for previewing a draft package
    #[clap(long)]
    pub trainer: Option<String>,
    /// Draft: total number of sessions
    #[clap(long)]
    pub sessions: Option<i64>,
    /// Draft: session duration in minutes
    #[clap(long)]
    pub duration: Option<i64>,
    /// Draft: weekday pattern(s), e.g. "mon,wed,fri"
    #[clap(long = "pattern", num_args = 1..)]
    pub patterns: Vec<String>,
    /// Base date (e.g. "2026-03-02", "next monday"); defaults to today in
    /// the trainer's timezone
    #[clap(long)]
    pub start: Option<String>,
    /// Do not relocate stale, unclaimed slots
    #[clap(long)]
    pub no_carry_forward: bool,
    /// Fan carried same-weekday slots out one per week
    #[clap(long)]
    pub spread_weekly: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Stored package ID
    #[clap(long)]
    pub package: String,
    /// Base date; defaults to today in the trainer's timezone
    #[clap(long)]
    pub start: Option<String>,
    /// Do not relocate stale, unclaimed slots
    #[clap(long)]
    pub no_carry_forward: bool,
    /// Fan carried same-weekday slots out one per week
    #[clap(long)]
    pub spread_weekly: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SlotsCommand {
    #[command(subcommand)]
    pub action: SlotsAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SlotsAction {
    /// List a trainer's stored slots
    List(SlotsListCommand),
    /// Release checkout holds that have expired
    ReleaseHolds,
    /// Delete slots whose retention window has passed
    Purge(SlotsPurgeCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct SlotsListCommand {
    /// Trainer ID
    pub trainer: String,
    /// Window start date (defaults to a week ago)
    #[clap(long)]
    pub from: Option<String>,
    /// Window end date (defaults to 90 days ahead)
    #[clap(long)]
    pub to: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SlotsPurgeCommand {
    /// Skip the confirmation prompt
    #[clap(long)]
    pub force: bool,
}
