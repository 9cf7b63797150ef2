use chrono::{DateTime, Utc};
use logbook_core::filter::FilterCriteria;

/// Row cap applied when the client gives no usable `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Raw query string of `GET /logs`.
///
/// Values stay strings so that a malformed number or time falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct LogsQueryParams {
    pub service: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl LogsQueryParams {
    /// Collects decoded query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "service" => &mut params.service,
                "level" => &mut params.level,
                "message" => &mut params.message,
                "start_time" => &mut params.start_time,
                "end_time" => &mut params.end_time,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            service: self.service,
            level: self.level,
            message: self.message,
            start_time: self.start_time.as_deref().and_then(parse_time),
            end_time: self.end_time.as_deref().and_then(parse_time),
            limit: self
                .limit
                .as_deref()
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_LIMIT),
            offset: self
                .offset
                .as_deref()
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v >= 0)
                .unwrap_or(0),
        }
    }
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
