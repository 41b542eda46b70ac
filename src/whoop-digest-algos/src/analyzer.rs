use std::collections::BTreeMap;

use whoop_digest_types::{
    AnalyticsReport, Correlations, DailySummary, RecoveryStats, SleepQuality, SleepStats,
    StrainStats, TimePeriod, TrendsAndPatterns, WorkoutEntry, WorkoutStats,
};

use crate::{
    DailySeries, PatternDetector, TrendAnalyzer,
    helpers::stats::{mean, mean_opt, std_dev},
    patterns::{LOW_RECOVERY, STRONG_RECOVERY},
};

/// Builds an [`AnalyticsReport`] from a finished sequence of daily summaries.
/// The input may be in any order; every series is read oldest first.
pub struct DigestAnalyzer<'a> {
    series: DailySeries,
    workouts: Vec<&'a WorkoutEntry>,
}

impl<'a> DigestAnalyzer<'a> {
    pub fn new(days: &'a [DailySummary]) -> Self {
        let series = DailySeries::from_summaries(days);

        let mut ordered = days.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|d| d.date);
        let workouts = ordered
            .into_iter()
            .flat_map(|d| d.strain.workouts.iter())
            .collect();

        Self { series, workouts }
    }

    pub fn analyze(&self) -> AnalyticsReport {
        debug!(
            "analyzing {} days with {} workouts",
            self.series.len(),
            self.workouts.len()
        );

        AnalyticsReport {
            recovery: self.recovery_stats(),
            sleep: self.sleep_stats(),
            strain: self.strain_stats(),
            workouts: self.workout_stats(),
            trends_and_patterns: self.trends_and_patterns(),
            time_period: self.time_period(),
        }
    }

    pub fn recovery_stats(&self) -> Option<RecoveryStats> {
        let scores = DailySeries::valid(&self.series.recovery);
        if scores.is_empty() {
            return None;
        }

        Some(RecoveryStats {
            average_recovery: mean(&scores),
            recovery_trend: TrendAnalyzer::trend_direction(&scores),
            consistency: TrendAnalyzer::consistency_score(&scores),
            days_below_33: scores.iter().filter(|s| **s < LOW_RECOVERY).count(),
            days_above_66: scores.iter().filter(|s| **s > STRONG_RECOVERY).count(),
        })
    }

    pub fn sleep_stats(&self) -> SleepStats {
        let durations = DailySeries::valid(&self.series.sleep_duration);
        let efficiencies = DailySeries::valid(&self.series.sleep_efficiency);
        let rem = DailySeries::valid(&self.series.rem_minutes);
        let deep = DailySeries::valid(&self.series.deep_minutes);
        let light = DailySeries::valid(&self.series.light_minutes);

        SleepStats {
            average_duration: mean_opt(&durations),
            average_efficiency: mean_opt(&efficiencies),
            sleep_consistency: TrendAnalyzer::consistency_score(&durations),
            sleep_debt: TrendAnalyzer::sleep_debt(&durations),
            quality_metrics: SleepQuality {
                average_rem: mean_opt(&rem),
                average_deep: mean_opt(&deep),
                average_light: mean_opt(&light),
                sleep_quality_score: TrendAnalyzer::sleep_quality_score(&rem, &deep, &light),
            },
        }
    }

    pub fn strain_stats(&self) -> StrainStats {
        let strains = DailySeries::valid(&self.series.day_strain);
        let has_data = !strains.is_empty();

        StrainStats {
            average_strain: mean_opt(&strains),
            strain_trend: TrendAnalyzer::trend_direction(&strains),
            strain_distribution: has_data.then(|| TrendAnalyzer::intensity_distribution(&strains)),
            strain_variability: has_data.then(|| std_dev(&strains)),
            peak_strain: strains.iter().copied().reduce(f64::max),
        }
    }

    pub fn workout_stats(&self) -> WorkoutStats {
        let total_workouts = self.workouts.len();

        let mut workout_types = BTreeMap::new();
        for workout in &self.workouts {
            *workout_types.entry(workout.sport_name.clone()).or_insert(0) += 1;
        }

        let total_duration_minutes = self
            .workouts
            .iter()
            .map(|w| w.duration_minutes.unwrap_or_default())
            .sum::<i64>();

        let strains = self
            .workouts
            .iter()
            .map(|w| w.strain.unwrap_or_default())
            .collect::<Vec<_>>();

        let per = |n: f64, of: usize| if of == 0 { 0_f64 } else { n / of as f64 };

        WorkoutStats {
            total_workouts,
            workout_frequency: per(total_workouts as f64, self.series.len()),
            workout_types,
            total_duration_minutes,
            average_duration_minutes: per(total_duration_minutes as f64, total_workouts),
            intensity_distribution: (total_workouts > 0)
                .then(|| TrendAnalyzer::intensity_distribution(&strains)),
        }
    }

    pub fn trends_and_patterns(&self) -> TrendsAndPatterns {
        let detector = PatternDetector::from_series(&self.series);

        TrendsAndPatterns {
            correlations: Correlations {
                recovery_strain: TrendAnalyzer::correlation(&DailySeries::paired(
                    &self.series.recovery,
                    &self.series.day_strain,
                )),
                sleep_recovery: TrendAnalyzer::correlation(&DailySeries::paired(
                    &self.series.sleep_duration,
                    &self.series.recovery,
                )),
            },
            patterns: detector.patterns(),
            focus_areas: detector.focus_areas(),
        }
    }

    pub fn time_period(&self) -> Option<TimePeriod> {
        Some(TimePeriod {
            start_date: *self.series.dates.first()?,
            end_date: *self.series.dates.last()?,
            total_days: self.series.len(),
        })
    }
}
