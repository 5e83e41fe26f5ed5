use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::CoreError;

/// Validate an IANA timezone name.
pub fn validate_timezone(timezone: &str) -> Result<(), CoreError> {
    Tz::from_str(timezone)
        .map(|_| ())
        .map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Current wall-clock instant in the given timezone.
///
/// Scheduling arithmetic runs entirely on the trainer's local clock; this
/// is the single place where UTC enters the picture.
pub fn local_now(timezone: &str) -> Result<NaiveDateTime, CoreError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}

/// Today's calendar date in the given timezone.
pub fn local_today(timezone: &str) -> Result<NaiveDate, CoreError> {
    Ok(local_now(timezone)?.date())
}
