//! Compact age strings in the style of `kubectl get`

use chrono::{DateTime, Duration, Utc};

/// Format an elapsed duration as a short human string.
///
/// Under two minutes shows seconds (`45s`), under ten minutes shows minutes
/// and seconds (`2m1s`), then whole minutes up to two hours, whole hours up
/// to a day, and whole days beyond. Every unit is truncated, never rounded.
/// Negative durations render as `0s`.
#[must_use]
pub fn format_age(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    match secs {
        s if s < 120 => format!("{s}s"),
        s if s < 600 => format!("{}m{}s", s / 60, s % 60),
        s if s < 120 * 60 => format!("{}m", s / 60),
        s if s < 24 * 3600 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}

/// Age of something created at `created`, as seen at `now`.
///
/// Returns `<unknown>` when the creation time is missing.
#[must_use]
pub fn age_since(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    created.map_or_else(|| "<unknown>".to_string(), |t| format_age(now - t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: i64, m: i64, s: i64) -> Duration {
        Duration::hours(h) + Duration::minutes(m) + Duration::seconds(s)
    }

    #[test]
    fn test_format_age_table() {
        let cases = [
            (hms(0, 0, 5), "5s"),
            (hms(0, 0, 119), "119s"),
            // >= 120s uses minutes and seconds
            (hms(0, 0, 120), "2m0s"),
            (hms(0, 0, 121), "2m1s"),
            (hms(0, 9, 59), "9m59s"),
            // >= 10m uses minutes
            (hms(0, 10, 0), "10m"),
            (hms(0, 119, 59), "119m"),
            // >= 120m uses hours
            (hms(0, 120, 0), "2h"),
            (hms(23, 59, 59), "23h"),
            // >= 1d uses days
            (hms(24, 0, 1), "1d"),
            (hms(24 * 9 + 23, 0, 0), "9d"),
        ];
        for (input, want) in cases {
            assert_eq!(format_age(input), want, "format_age({input})");
        }
    }

    #[test]
    fn test_format_age_seconds_have_single_unit() {
        for s in 0..120 {
            let got = format_age(Duration::seconds(s));
            assert!(got.ends_with('s'), "{got}");
            assert!(
                !got.contains(['m', 'h', 'd']),
                "unexpected unit in {got} for {s}s"
            );
        }
    }

    #[test]
    fn test_format_age_truncates_subsecond() {
        assert_eq!(format_age(Duration::milliseconds(45_900)), "45s");
    }

    #[test]
    fn test_format_age_zero_and_negative() {
        assert_eq!(format_age(Duration::zero()), "0s");
        assert_eq!(format_age(Duration::seconds(-30)), "0s");
    }

    #[test]
    fn test_age_since() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(age_since(Some(now - Duration::hours(1)), now), "60m");
        assert_eq!(age_since(None, now), "<unknown>");
    }
}
