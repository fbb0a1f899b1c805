use crate::reminders::LocalDateTime;
use chrono::{DateTime, LocalResult};
use chrono_tz::Tz;
use time::OffsetDateTime;

/// Describes why local date, time or zone couldn't be normalized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTimeInput {
    #[error("Invalid date `{0}`, expected `YYYY-MM-DD`.")]
    Date(String),
    #[error("Invalid time `{0}`, expected `HH:MM` or `HH:MM:SS`.")]
    Time(String),
    #[error("Unknown time zone `{0}`.")]
    Zone(String),
    #[error("Local time `{local}` doesn't exist in `{zone}` time zone.")]
    NonexistentLocalTime { local: String, zone: String },
    #[error("Time is out of the supported range.")]
    OutOfRange,
}

/// Converts wall-clock date and time in a named zone to the canonical instant and back.
///
/// If the local time is ambiguous (clocks are set back), the earliest of the two instants is
/// used. Local time that is skipped by a zone transition is rejected.
pub struct TimeNormalizer;

impl TimeNormalizer {
    /// Resolves IANA time zone name (e.g. `Asia/Kolkata`).
    pub fn resolve_zone(zone_name: &str) -> Result<Tz, InvalidTimeInput> {
        zone_name
            .trim()
            .parse::<Tz>()
            .map_err(|_| InvalidTimeInput::Zone(zone_name.to_string()))
    }

    /// Converts local date and time in the specified zone to the canonical UTC instant.
    pub fn to_canonical(
        local: &LocalDateTime,
        zone_name: &str,
    ) -> Result<OffsetDateTime, InvalidTimeInput> {
        let zone = Self::resolve_zone(zone_name)?;
        let zoned = match local.date.and_time(local.time).and_local_timezone(zone) {
            LocalResult::Single(zoned) => zoned,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                return Err(InvalidTimeInput::NonexistentLocalTime {
                    local: local.to_string(),
                    zone: zone.name().to_string(),
                })
            }
        };

        OffsetDateTime::from_unix_timestamp(zoned.timestamp())
            .map_err(|_| InvalidTimeInput::OutOfRange)
    }

    /// Converts the canonical instant to local date and time in the specified zone. Never alters
    /// the instant itself.
    pub fn to_local(
        instant: OffsetDateTime,
        zone_name: &str,
    ) -> Result<LocalDateTime, InvalidTimeInput> {
        let zone = Self::resolve_zone(zone_name)?;
        let local = DateTime::from_timestamp(instant.unix_timestamp(), 0)
            .ok_or(InvalidTimeInput::OutOfRange)?
            .with_timezone(&zone)
            .naive_local();

        Ok(LocalDateTime::new(local.date(), local.time()))
    }
}
