//! Date and time formatting in the system time zone.

use std::fmt;

use jiff::{SignedDuration, Timestamp, tz::TimeZone};

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats only the calendar date, e.g. `Mon, Mar 4 2024`.
pub struct LocalDate<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%a, %b %-d %Y")
        )
    }
}

/// Whole days from `from` until `until`, rounded up and never negative.
pub fn days_until(from: Timestamp, until: Timestamp) -> i64 {
    let remaining = until.duration_since(from);
    if remaining <= SignedDuration::ZERO {
        return 0;
    }
    let day = SignedDuration::from_hours(24).as_secs();
    (remaining.as_secs() + day - 1) / day
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_until_rounds_up() {
        let t0 = Timestamp::from_second(1_700_000_000).unwrap();
        let day = SignedDuration::from_hours(24);

        assert_eq!(days_until(t0, t0 + day * 4), 4);
        assert_eq!(days_until(t0, t0 + day * 4 - SignedDuration::from_secs(60)), 4);
        assert_eq!(days_until(t0, t0 + SignedDuration::from_secs(1)), 1);
        assert_eq!(days_until(t0, t0), 0);
        assert_eq!(days_until(t0 + day, t0), 0);
    }
}
