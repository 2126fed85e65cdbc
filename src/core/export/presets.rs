//! Named date-range presets
//!
//! Mirrors the preset choices offered next to the custom range picker:
//! all presets end at yesterday (today's data is still being collected by
//! the upstream pipeline).

use chrono::{Datelike, Duration, NaiveDate};
use std::str::FromStr;

/// A named date range relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    /// The 30 days before today, ending yesterday
    Last30Days,
    /// From the first of the current month through yesterday
    ThisMonth,
    /// The whole previous calendar month
    LastMonth,
}

impl DatePreset {
    /// Resolves the preset into a concrete `(start, end)` range
    ///
    /// `today` is the reference day, normally the current date; taking it
    /// as a parameter keeps resolution deterministic and testable.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let yesterday = today - Duration::days(1);
        match self {
            DatePreset::Last30Days => (today - Duration::days(30), yesterday),
            DatePreset::ThisMonth => (first_of_month(today), yesterday),
            DatePreset::LastMonth => {
                let last_of_prev = first_of_month(today) - Duration::days(1);
                (first_of_month(last_of_prev), last_of_prev)
            }
        }
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-30-days" => Ok(DatePreset::Last30Days),
            "this-month" => Ok(DatePreset::ThisMonth),
            "last-month" => Ok(DatePreset::LastMonth),
            other => Err(format!(
                "Unknown date preset: {other}. Must be one of: last-30-days, this-month, last-month"
            )),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 always exists")
}
