use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use chrono_english::{parse_date_string, Dialect};
use uuid::Uuid;

pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| anyhow!("'{}' is not a valid ID", raw))
}

/// Parses a base date from either an ISO date or casual English
/// ("next monday", "tomorrow").
pub fn parse_base_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(raw, Utc::now(), Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", raw, e))
}

/// Parses a weekday list like "mon,wed,fri" or "1,3,5" into raw indices
/// (0 = Sunday). Unknown tokens are an error here — the CLI is a trusted
/// editor, unlike the tolerant document path.
pub fn parse_weekdays(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(|token| {
            let token = token.trim().to_lowercase();
            match token.as_str() {
                "sun" | "sunday" => Ok(0),
                "mon" | "monday" => Ok(1),
                "tue" | "tuesday" => Ok(2),
                "wed" | "wednesday" => Ok(3),
                "thu" | "thursday" => Ok(4),
                "fri" | "friday" => Ok(5),
                "sat" | "saturday" => Ok(6),
                _ => token
                    .parse::<i64>()
                    .ok()
                    .filter(|d| (0..=6).contains(d))
                    .ok_or_else(|| anyhow!("Unknown weekday '{}'", token)),
            }
        })
        .collect()
}

pub fn weekday_name(day: u8) -> &'static str {
    match day {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_lists_parse() {
        assert_eq!(parse_weekdays("mon,wed,fri").unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_weekdays("1, 3, 5").unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_weekdays("Sun").unwrap(), vec![0]);
        assert!(parse_weekdays("mon,funday").is_err());
        assert!(parse_weekdays("8").is_err());
    }

    #[test]
    fn iso_dates_parse_directly() {
        assert_eq!(
            parse_base_date("2026-03-02").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert!(parse_base_date("not a date at all ???").is_err());
    }
}
