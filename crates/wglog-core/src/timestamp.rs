//! Timestamp normalisation for syslog-style headers (`Jul 22 14:13:18`).
//!
//! The header carries neither year nor offset. The year comes from the
//! normaliser's reference date according to its [`YearPolicy`]; the result
//! stays naive. Inputs that already carry a year are accepted as they are.

use crate::config::YearPolicy;
use crate::error::{ExtractError, ExtractResult};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Formats for inputs that carry their own year.
const WITH_YEAR: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y %b %d %H:%M:%S%.f",
    "%Y %B %d %H:%M:%S%.f",
    "%b %d %Y %H:%M:%S%.f",
];

/// Formats for yearless headers, tried with the resolved year prepended.
const WITHOUT_YEAR: &[&str] = &["%Y %b %d %H:%M:%S%.f", "%Y %B %d %H:%M:%S%.f"];

#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    policy: YearPolicy,
    reference: NaiveDate,
}

impl TimestampNormalizer {
    /// Normaliser that resolves missing years against today's local date.
    pub fn new(policy: YearPolicy) -> Self {
        Self::with_reference(policy, Local::now().date_naive())
    }

    /// Normaliser with a fixed reference date.
    pub fn with_reference(policy: YearPolicy, reference: NaiveDate) -> Self {
        Self { policy, reference }
    }

    pub fn normalize(&self, raw: &str) -> ExtractResult<NaiveDateTime> {
        let raw = raw.trim();
        if let Some(parsed) = parse_any(raw, WITH_YEAR) {
            return Ok(parsed);
        }

        let parsed = self
            .parse_in_year(raw, self.reference.year())
            .ok_or_else(|| ExtractError::TimestampParse { raw: raw.to_string() })?;

        match self.policy {
            YearPolicy::Current => Ok(parsed),
            YearPolicy::Rollover if parsed.month() > self.reference.month() => self
                .parse_in_year(raw, self.reference.year() - 1)
                .ok_or_else(|| ExtractError::TimestampParse { raw: raw.to_string() }),
            YearPolicy::Rollover => Ok(parsed),
        }
    }

    fn parse_in_year(&self, raw: &str, year: i32) -> Option<NaiveDateTime> {
        parse_any(&format!("{year} {raw}"), WITHOUT_YEAR)
    }
}

fn parse_any(raw: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `YYYY-MM-DDTHH:MM:SS`, with `.ffffff` only when there is a sub-second
/// part. No offset.
pub fn render(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
