//! Synthetic listing expiration dates.
//!
//! Every record gets its own date drawn uniformly from a window that
//! opens `start_months` from now and closes `end_months` from now.

use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub const EXPIRY_FORMAT: &str = "%m/%d/%Y";

/// Month offsets bounding the expiration window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryWindow {
    pub start_months: u32,
    pub end_months: u32,
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self {
            start_months: 3,
            end_months: 5,
        }
    }
}

impl ExpiryWindow {
    pub fn new(start_months: u32, end_months: u32) -> Result<Self, ConfigError> {
        let window = Self {
            start_months,
            end_months,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_months <= self.start_months {
            return Err(ConfigError::InvalidExpiryWindow {
                start_months: self.start_months,
                end_months: self.end_months,
            });
        }
        Ok(())
    }

    /// Window bounds relative to `now`, or an error if they do not form a
    /// non-empty interval.
    ///
    /// Works on wall-clock time so that a bound landing in a daylight-saving
    /// gap or overlap still exists.
    pub fn bounds(
        &self,
        now: NaiveDateTime,
    ) -> Result<(NaiveDateTime, NaiveDateTime), ConfigError> {
        self.validate()?;
        let invalid = || ConfigError::InvalidExpiryWindow {
            start_months: self.start_months,
            end_months: self.end_months,
        };
        let start = now
            .checked_add_months(Months::new(self.start_months))
            .ok_or_else(invalid)?;
        let end = now
            .checked_add_months(Months::new(self.end_months))
            .ok_or_else(invalid)?;
        if end <= start {
            return Err(invalid());
        }
        Ok((start, end))
    }
}

/// Pick a date uniformly inside the window anchored at local time `now`
pub fn expiration_date<R: Rng>(
    now: NaiveDateTime,
    window: &ExpiryWindow,
    rng: &mut R,
) -> Result<NaiveDate, ConfigError> {
    let (start, end) = window.bounds(now)?;
    let span_ms = (end - start).num_milliseconds();
    let offset = rng.random_range(0..=span_ms);
    let picked = start + Duration::milliseconds(offset);
    Ok(picked.date())
}

pub fn format_expiration(date: NaiveDate) -> String {
    date.format(EXPIRY_FORMAT).to_string()
}

/// Per-record expiration source; recomputed on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryGenerator {
    window: ExpiryWindow,
}

impl ExpiryGenerator {
    pub fn new(window: ExpiryWindow) -> Self {
        Self { window }
    }

    pub fn generate(&self) -> Result<String, ConfigError> {
        let date = expiration_date(Local::now().naive_local(), &self.window, &mut rand::rng())?;
        Ok(format_expiration(date))
    }
}
