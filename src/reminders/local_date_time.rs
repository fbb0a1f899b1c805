use crate::reminders::InvalidTimeInput;
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const TIME_WITH_SECONDS_FORMAT: &str = "%H:%M:%S";

/// Wall-clock date and time without any zone attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl LocalDateTime {
    /// Creates local date and time, sub-second precision is dropped.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: time.with_nanosecond(0).unwrap_or(time),
        }
    }

    /// Parses `YYYY-MM-DD` date and `HH:MM` (or `HH:MM:SS`) time.
    pub fn parse(date: &str, time: &str) -> Result<Self, InvalidTimeInput> {
        let parsed_date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| InvalidTimeInput::Date(date.to_string()))?;
        let parsed_time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(time.trim(), TIME_WITH_SECONDS_FORMAT))
            .map_err(|_| InvalidTimeInput::Time(time.to_string()))?;

        Ok(Self::new(parsed_date, parsed_time))
    }

    /// Formats the date part as `YYYY-MM-DD`.
    pub fn format_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Formats the time part as `HH:MM`, or `HH:MM:SS` if seconds are set.
    pub fn format_time(&self) -> String {
        if self.time.second() == 0 {
            self.time.format(TIME_FORMAT).to_string()
        } else {
            self.time.format(TIME_WITH_SECONDS_FORMAT).to_string()
        }
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_date(), self.format_time())
    }
}
