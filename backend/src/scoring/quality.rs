use chrono::{NaiveTime, Timelike};

pub const MIN_QUALITY: i32 = 1;
pub const MAX_QUALITY: i32 = 10;
pub const LATE_BEDTIME_PENALTY: i32 = 2;

/// Scores a night of sleep from 1 to 10.
///
/// The duration band sets the base score; falling asleep between 01:00 and
/// 05:59 costs [`LATE_BEDTIME_PENALTY`] points.
pub fn sleep_quality(hours_slept: f64, sleep_start: Option<NaiveTime>) -> i32 {
    let base = base_score(hours_slept);

    let score = match sleep_start {
        Some(start) if is_late_bedtime(start) => (base - LATE_BEDTIME_PENALTY).max(MIN_QUALITY),
        _ => base,
    };

    score.clamp(MIN_QUALITY, MAX_QUALITY)
}

// Bands are checked in order; first match wins.
fn base_score(hours: f64) -> i32 {
    if (7.0..=9.0).contains(&hours) {
        8
    } else if (6.0..7.0).contains(&hours) {
        6
    } else if hours > 9.0 && hours <= 10.0 {
        7
    } else if hours <= 5.0 {
        3
    } else {
        5
    }
}

fn is_late_bedtime(start: NaiveTime) -> bool {
    (1..6).contains(&start.hour())
}
