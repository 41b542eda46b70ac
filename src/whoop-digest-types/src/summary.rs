use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of heart rate zones WHOOP reports per workout.
pub const ZONE_COUNT: usize = 6;

/// Sleep for one calendar date. Durations are whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySleepRecord {
    pub total_duration_minutes: i64,
    pub disturbance_count: i64,
    /// Best single session efficiency of the day.
    pub efficiency_percentage: f64,
    pub awake_minutes: i64,
    pub light_minutes: i64,
    pub deep_minutes: i64,
    pub rem_minutes: i64,
    pub sleep_cycle_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub sport_id: i64,
    pub sport_name: String,
    pub strain: Option<f64>,
    pub avg_hr: Option<u16>,
    pub max_hr: Option<u16>,
    pub duration_minutes: Option<i64>,
    pub zone_duration_millis: [Option<i64>; ZONE_COUNT],
    /// Percent of the total zone time spent in each zone.
    pub zone_share_percentages: Option<[f64; ZONE_COUNT]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrainData {
    pub day_strain: Option<f64>,
    #[serde(default)]
    pub workouts: Vec<WorkoutEntry>,
}

/// One row of the aggregated output. Every date of the requested window has
/// exactly one, with `None`/empty fields where no source had data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub recovery_score: Option<f64>,
    pub sleep: Option<DailySleepRecord>,
    #[serde(default)]
    pub strain: StrainData,
}

impl DailySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            recovery_score: None,
            sleep: None,
            strain: StrainData::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recovery_score.is_none()
            && self.sleep.is_none()
            && self.strain.day_strain.is_none()
            && self.strain.workouts.is_empty()
    }

    pub fn sleep_duration(&self) -> Option<f64> {
        self.sleep.map(|s| s.total_duration_minutes as f64)
    }
}
