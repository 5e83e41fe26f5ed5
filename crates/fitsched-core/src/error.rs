use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("No slots could be generated for this package and working-hour setup.")]
    NoSlotsGenerated,

    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    #[error("An unknown error has occurred.")]
    Unknown,
}
