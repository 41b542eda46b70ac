use chrono::NaiveDate;
use serde::Serialize;
use whoop_digest_algos::{DateWindow, analyze};
use whoop_digest_types::{AnalyticsReport, DailySummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
    pub timezone: &'static str,
}

/// Daily summaries together with the analytics computed from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestReport {
    pub window: ReportWindow,
    pub daily_summaries: Vec<DailySummary>,
    pub analytics: AnalyticsReport,
}

impl DigestReport {
    pub fn new(window: &DateWindow, timezone: &'static str, daily_summaries: Vec<DailySummary>) -> Self {
        let analytics = analyze(&daily_summaries);
        Self {
            window: ReportWindow {
                start_date: window.start(),
                end_date: window.end(),
                timezone,
            },
            daily_summaries,
            analytics,
        }
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

#[cfg(test)]
mod tests {
    use whoop_digest_types::TrendDirection;

    use super::*;

    #[test]
    fn report_over_empty_days() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = DateWindow::days_from(start, 3);
        let days = window.dates().rev().map(DailySummary::empty).collect();

        let report = DigestReport::new(&window, "UTC", days);
        assert_eq!(report.daily_summaries.len(), 3);
        assert_eq!(report.analytics.recovery, None);
        assert_eq!(report.analytics.strain.strain_trend, TrendDirection::InsufficientData);
        assert_eq!(report.analytics.time_period.unwrap().total_days, 3);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["window"]["end_date"], "2024-03-04");
        assert_eq!(json["analytics"]["strain"]["strain_trend"], "insufficient_data");
        assert!(json["daily_summaries"][0]["sleep"].is_null());
    }

    #[test]
    fn compact_and_pretty() {
        let value = vec![1, 2];
        assert_eq!(to_json(&value, false).unwrap(), "[1,2]");
        assert!(to_json(&value, true).unwrap().contains('\n'));
    }
}
