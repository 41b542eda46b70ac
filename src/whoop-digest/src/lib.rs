#[macro_use]
extern crate log;

mod input;
pub use input::{load_streams, load_summaries, parse_streams, parse_summaries, read_input};

mod output;
pub use output::{DigestReport, ReportWindow, to_json};

use anyhow::anyhow;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use whoop_digest_algos::{DailyAggregator, DateWindow, DuplicatePolicy};
use whoop_digest_types::{DailySummary, RawStreams};

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Parses an IANA timezone name such as `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone `{name}`: {e}"))
}

/// Window of `days` dates starting at `start`, never reaching past `today`
/// (the current UTC date when not given).
pub fn resolve_window(start: Option<NaiveDate>, days: u32, today: Option<NaiveDate>) -> DateWindow {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let window = DateWindow::trailing(start, today, days);
    if start.is_some_and(|s| s != window.start()) {
        info!(
            "requested start date pulled back to {} to end by {}",
            window.start(),
            today
        );
    }
    window
}

pub fn summarize<Tz: TimeZone>(
    streams: &RawStreams,
    window: &DateWindow,
    tz: Tz,
    policy: DuplicatePolicy,
) -> Vec<DailySummary> {
    info!(
        "aggregating {} records into {} days starting {} ({policy})",
        streams.len(),
        window.len(),
        window.start()
    );
    DailyAggregator::new(tz)
        .with_policy(policy)
        .aggregate(streams, window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timezones() {
        assert_eq!(parse_timezone(DEFAULT_TIMEZONE).unwrap(), chrono_tz::America::New_York);
        assert_eq!(parse_timezone(" UTC ").unwrap(), chrono_tz::UTC);
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn window_ends_by_today() {
        let today = date(2024, 3, 10);

        let window = resolve_window(None, 7, Some(today));
        assert_eq!(window.start(), date(2024, 3, 4));
        assert_eq!(window.end(), date(2024, 3, 11));

        let window = resolve_window(Some(date(2024, 3, 8)), 7, Some(today));
        assert_eq!(window.start(), date(2024, 3, 4));

        let window = resolve_window(Some(date(2024, 2, 1)), 3, Some(today));
        assert_eq!(window.start(), date(2024, 2, 1));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn summarize_in_local_time() {
        let streams = parse_streams(
            r#"{
                "recovery": [
                    {"created_at": "2024-03-05T03:30:00Z", "score": {"recovery_score": 41.256}}
                ],
                "cycle": [
                    {"start": "2024-03-05T12:00:00Z", "score": {"strain": 9.1}}
                ]
            }"#,
        )
        .unwrap();

        let window = DateWindow::days_from(date(2024, 3, 4), 2);
        let days = summarize(
            &streams,
            &window,
            parse_timezone(DEFAULT_TIMEZONE).unwrap(),
            DuplicatePolicy::LastWins,
        );

        // newest first; the 03:30 UTC recovery belongs to the 4th in New York
        assert_eq!(days[0].date, date(2024, 3, 5));
        assert_eq!(days[0].recovery_score, None);
        assert_eq!(days[0].strain.day_strain, Some(9.1));
        assert_eq!(days[1].recovery_score, Some(41.26));
    }
}
