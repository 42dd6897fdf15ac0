// CIGAM Bridge: Clock & Date Helpers
//
// The ERP takes plain `YYYY-MM-DD` dates in filters and full RFC 3339
// timestamps for `request_date`. The clock is injected so requisition
// bodies are reproducible under test.

use crate::atoms::error::{CigamError, CigamResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

// ── Clock ──────────────────────────────────────────────────────────────────

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// `now()` as RFC 3339 with milliseconds and a `Z` suffix.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ── Date parsing ───────────────────────────────────────────────────────────

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Anything that can be reduced to a UTC calendar date.
pub trait DateInput {
    fn to_utc_date(&self) -> Option<NaiveDate>;
}

impl DateInput for str {
    /// Accepts RFC 3339, naive date-times (read as UTC) and bare dates.
    fn to_utc_date(&self) -> Option<NaiveDate> {
        let s = self.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.date());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }
}

impl DateInput for String {
    fn to_utc_date(&self) -> Option<NaiveDate> {
        self.as_str().to_utc_date()
    }
}

impl DateInput for NaiveDate {
    fn to_utc_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl DateInput for NaiveDateTime {
    fn to_utc_date(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> DateInput for DateTime<Tz> {
    fn to_utc_date(&self) -> Option<NaiveDate> {
        Some(self.with_timezone(&Utc).date_naive())
    }
}

/// Whether `s` parses as a calendar date or date-time.
pub fn is_valid_date(s: &str) -> bool {
    s.to_utc_date().is_some()
}

/// Render a date-like value as `YYYY-MM-DD` (UTC), dropping time of day.
pub fn format_date<D: DateInput + std::fmt::Debug + ?Sized>(date: &D) -> CigamResult<String> {
    date.to_utc_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| CigamError::invalid_args(format!("invalid date: {:?}", date)))
}
