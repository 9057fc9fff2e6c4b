//! Pure derivations over raw log input: wall-clock arithmetic, the 1-10 sleep
//! quality score and consecutive-day streaks. Nothing here touches storage.

pub mod clock;
pub mod quality;
pub mod streak;

pub use clock::{parse_hhmm, sleep_hours};
pub use quality::sleep_quality;
pub use streak::{current_streak, longest_streak};
