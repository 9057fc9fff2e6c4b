use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected HH:MM, got {0:?}")]
pub struct InvalidTime(pub String);

/// Parses an `HH:MM` wall-clock string into minutes past midnight (0..=1439).
pub fn minutes_since_midnight(time: &str) -> Result<u32, InvalidTime> {
    let invalid = || InvalidTime(time.to_string());

    let (hours, minutes) = time.trim().split_once(':').ok_or_else(invalid)?;
    let hours = parse_component(hours).ok_or_else(invalid)?;
    let minutes = parse_component(minutes).ok_or_else(invalid)?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

// One or two ASCII digits; `u32::from_str` alone would accept a leading '+'.
fn parse_component(raw: &str) -> Option<u32> {
    if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub fn parse_hhmm(time: &str) -> Result<NaiveTime, InvalidTime> {
    let minutes = minutes_since_midnight(time)?;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).ok_or_else(|| InvalidTime(time.into()))
}

pub fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minutes between two wall-clock offsets. An end at or before the start is
/// taken to fall on the next calendar day.
pub fn duration_minutes(start: u32, end: u32) -> u32 {
    if end <= start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    }
}

/// Minutes to hours, rounded half-up to one decimal place.
pub fn round_hours(minutes: u32) -> f64 {
    // Integer tenths avoid binary float drift on values like 7.75.
    let tenths = (minutes * 10 + 30) / 60;
    f64::from(tenths) / 10.0
}

pub fn sleep_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    round_hours(duration_minutes(minutes_of(start), minutes_of(end)))
}

/// Serde adapter that renders a `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}
