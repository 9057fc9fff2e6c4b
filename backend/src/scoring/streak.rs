use chrono::NaiveDate;

/// Number of consecutive days, ending today, that each have a log.
///
/// Walks the dates newest-first; each must sit exactly `streak` days before
/// `today`. A history whose newest entry is yesterday yields 0.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    for date in sorted {
        if (today - date).num_days() == i64::from(streak) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Longest run of consecutive calendar days anywhere in the history.
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in sorted {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(current_streak(&[], today()), 0);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_today_only() {
        assert_eq!(current_streak(&[today()], today()), 1);
    }

    #[test]
    fn test_three_day_chain() {
        let dates = [days_ago(0), days_ago(1), days_ago(2)];
        assert_eq!(current_streak(&dates, today()), 3);
    }

    #[test]
    fn test_unsorted_input() {
        let dates = [days_ago(2), days_ago(0), days_ago(1)];
        assert_eq!(current_streak(&dates, today()), 3);
    }

    #[test]
    fn test_yesterday_only_is_zero() {
        assert_eq!(current_streak(&[days_ago(1)], today()), 0);
    }

    #[test]
    fn test_gap_breaks_chain() {
        let dates = [days_ago(0), days_ago(1), days_ago(3)];
        assert_eq!(current_streak(&dates, today()), 2);
    }

    #[test]
    fn test_future_entry_breaks_chain() {
        let dates = [today() + Duration::days(1), days_ago(0)];
        assert_eq!(current_streak(&dates, today()), 0);
    }

    #[test]
    fn test_chain_across_month_boundary() {
        // 2026-03-01 back through February
        let dates: Vec<_> = (0..5).map(days_ago).collect();
        assert_eq!(current_streak(&dates, today()), 5);
    }

    #[test]
    fn test_longest_streak_finds_older_run() {
        let dates = [
            days_ago(0),
            days_ago(10),
            days_ago(11),
            days_ago(12),
            days_ago(13),
            days_ago(20),
        ];
        assert_eq!(longest_streak(&dates), 4);
        assert_eq!(current_streak(&dates, today()), 1);
    }

    #[test]
    fn test_longest_streak_ignores_duplicates() {
        let dates = [days_ago(1), days_ago(1), days_ago(2)];
        assert_eq!(longest_streak(&dates), 2);
    }
}
