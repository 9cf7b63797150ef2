use chrono::{DateTime, TimeZone, Utc};

use crate::error::{LogbookError, Result};

pub fn parse_time_or_relative(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(duration) = humantime::parse_duration(input) {
        return Ok(Utc::now()
            - chrono::Duration::from_std(duration).map_err(|e| {
                LogbookError::Parse(format!("failed to parse duration to chrono: {e}"))
            })?);
    }

    Err(LogbookError::Parse(format!(
        "expected RFC3339 time or duration, got {input}"
    )))
}

/// Whether a supplied timestamp means "not set".
///
/// Besides a missing value this covers `0001-01-01T00:00:00Z`, which clients
/// written in languages with zero-valued time structs send for unset times.
pub fn is_unset(ts: Option<&DateTime<Utc>>) -> bool {
    match ts {
        None => true,
        Some(ts) => Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).single() == Some(*ts),
    }
}
