use clap::Parser;
use fitsched_core::db;
use fitsched_core::error::CoreError;
use fitsched_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Trainer(command) => match command.action {
            cli::TrainerAction::Add(command) => {
                commands::trainer::add_trainer(&repository, command, &config).await
            }
            cli::TrainerAction::Hours(command) => {
                commands::trainer::add_hours(&repository, command).await
            }
        },
        cli::Commands::Package(command) => match command.action {
            cli::PackageAction::Add(command) => {
                commands::package::add_package(&repository, command).await
            }
            cli::PackageAction::List(command) => {
                commands::package::list_packages(&repository, command).await
            }
        },
        cli::Commands::Preview(command) => commands::preview::preview(&repository, command).await,
        cli::Commands::Generate(command) => {
            commands::generate::generate(&repository, command).await
        }
        cli::Commands::Slots(command) => match command.action {
            cli::SlotsAction::List(command) => {
                commands::slots::list_slots(&repository, command).await
            }
            cli::SlotsAction::ReleaseHolds => commands::slots::release_holds(&repository).await,
            cli::SlotsAction::Purge(command) => {
                commands::slots::purge(&repository, command).await
            }
        },
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::NoSlotsGenerated => {
                eprintln!(
                    "{} {}",
                    "Error:".style(error_style),
                    "No slots could be generated — check that the trainer's working hours cover the package's weekdays."
                        .yellow()
                );
            }
            CoreError::InvalidTimezone(tz) => {
                eprintln!(
                    "{} Invalid timezone '{}'. Use IANA names like 'Asia/Ho_Chi_Minh'.",
                    "Error:".style(error_style),
                    tz.yellow()
                );
            }
            CoreError::SlotUnavailable(s) => {
                eprintln!("{} Slot unavailable: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
