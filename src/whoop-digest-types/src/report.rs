use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

/// Qualitative findings surfaced by threshold rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Pattern {
    /// Average recovery below 33.
    LowRecoveryOvertrainingRisk,
    /// Average recovery above 66.
    StrongRecoveryAdaptation,
    /// Average sleep below 7 hours.
    SleepDeficit,
    /// At least three days in a row with day strain above 15.
    ConsecutiveHighStrain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FocusArea {
    PrioritizeRecovery,
    IncreaseSleep,
    AddLowIntensityDays,
}

/// Counts of values below 8, in `[8, 14)` and at or above 14.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityDistribution {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryStats {
    pub average_recovery: f64,
    pub recovery_trend: TrendDirection,
    pub consistency: f64,
    pub days_below_33: usize,
    pub days_above_66: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepQuality {
    pub average_rem: Option<f64>,
    pub average_deep: Option<f64>,
    pub average_light: Option<f64>,
    pub sleep_quality_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStats {
    pub average_duration: Option<f64>,
    pub average_efficiency: Option<f64>,
    pub sleep_consistency: f64,
    /// Minutes short of 8 hours, summed over the nights with data.
    pub sleep_debt: f64,
    pub quality_metrics: SleepQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainStats {
    pub average_strain: Option<f64>,
    pub strain_trend: TrendDirection,
    pub strain_distribution: Option<IntensityDistribution>,
    pub strain_variability: Option<f64>,
    pub peak_strain: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub workout_frequency: f64,
    pub workout_types: BTreeMap<String, usize>,
    pub total_duration_minutes: i64,
    pub average_duration_minutes: f64,
    pub intensity_distribution: Option<IntensityDistribution>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlations {
    pub recovery_strain: Option<f64>,
    pub sleep_recovery: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsAndPatterns {
    pub correlations: Correlations,
    pub patterns: Vec<Pattern>,
    pub focus_areas: Vec<FocusArea>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// `None` when no day has a recovery score.
    pub recovery: Option<RecoveryStats>,
    pub sleep: SleepStats,
    pub strain: StrainStats,
    pub workouts: WorkoutStats,
    pub trends_and_patterns: TrendsAndPatterns,
    pub time_period: Option<TimePeriod>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn enums_use_snake_case() {
        assert_eq!(TrendDirection::InsufficientData.to_string(), "insufficient_data");
        assert_eq!(
            serde_json::to_string(&Pattern::ConsecutiveHighStrain).unwrap(),
            "\"consecutive_high_strain\""
        );
        assert_eq!(
            FocusArea::from_str("add_low_intensity_days").unwrap(),
            FocusArea::AddLowIntensityDays
        );
    }
}
