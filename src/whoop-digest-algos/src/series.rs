use chrono::NaiveDate;
use whoop_digest_types::DailySummary;

/// Per-metric columns of an aggregated sequence, oldest day first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub recovery: Vec<Option<f64>>,
    pub sleep_duration: Vec<Option<f64>>,
    pub sleep_efficiency: Vec<Option<f64>>,
    pub rem_minutes: Vec<Option<f64>>,
    pub deep_minutes: Vec<Option<f64>>,
    pub light_minutes: Vec<Option<f64>>,
    pub day_strain: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn from_summaries(days: &[DailySummary]) -> Self {
        let mut ordered = days.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|d| d.date);

        let mut series = Self::default();
        for day in ordered {
            let sleep = day.sleep.as_ref();
            series.dates.push(day.date);
            series.recovery.push(day.recovery_score);
            series.sleep_duration.push(day.sleep_duration());
            series
                .sleep_efficiency
                .push(sleep.map(|s| s.efficiency_percentage));
            series.rem_minutes.push(sleep.map(|s| s.rem_minutes as f64));
            series.deep_minutes.push(sleep.map(|s| s.deep_minutes as f64));
            series.light_minutes.push(sleep.map(|s| s.light_minutes as f64));
            series.day_strain.push(day.strain.day_strain);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Non-null values, in order.
    pub fn valid(column: &[Option<f64>]) -> Vec<f64> {
        column.iter().flatten().copied().collect()
    }

    /// Dates where both columns have a value.
    pub fn paired(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<(f64, f64)> {
        a.iter()
            .zip(b)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use whoop_digest_types::{DailySleepRecord, StrainData};

    use super::*;

    fn day(d: u32, recovery: Option<f64>, sleep_minutes: Option<i64>) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            recovery_score: recovery,
            sleep: sleep_minutes.map(|m| DailySleepRecord {
                total_duration_minutes: m,
                rem_minutes: m / 4,
                ..Default::default()
            }),
            strain: StrainData::default(),
        }
    }

    #[test]
    fn columns_are_chronological() {
        let days = [
            day(3, Some(70.0), Some(400)),
            day(2, None, None),
            day(1, Some(50.0), Some(480)),
        ];
        let series = DailySeries::from_summaries(&days);

        assert_eq!(series.len(), 3);
        assert_eq!(series.dates[0], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(series.recovery, vec![Some(50.0), None, Some(70.0)]);
        assert_eq!(series.rem_minutes, vec![Some(120.0), None, Some(100.0)]);
        assert_eq!(DailySeries::valid(&series.recovery), vec![50.0, 70.0]);
    }

    #[test]
    fn pairs_skip_incomplete_dates() {
        let a = [Some(1.0), None, Some(3.0), Some(4.0)];
        let b = [Some(2.0), Some(5.0), None, Some(8.0)];
        assert_eq!(DailySeries::paired(&a, &b), vec![(1.0, 2.0), (4.0, 8.0)]);
    }
}
