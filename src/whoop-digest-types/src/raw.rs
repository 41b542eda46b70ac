//! Raw WHOOP collection records, as returned by the v1 developer API.
//!
//! Every field is optional. Timestamps are kept as the strings the API sent so
//! that a single unparsable value only drops its own record during aggregation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Recovery,
    Sleep,
    Cycle,
    Workout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub cycle_id: Option<i64>,
    pub sleep_id: Option<String>,
    pub created_at: Option<String>,
    pub score: Option<RecoveryScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    pub recovery_score: Option<f64>,
    pub resting_heart_rate: Option<f64>,
    pub hrv_rmssd_milli: Option<f64>,
}

impl RecoveryRecord {
    pub fn recovery_score(&self) -> Option<f64> {
        self.score.as_ref().and_then(|s| s.recovery_score)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub nap: bool,
    pub score: Option<SleepScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    pub sleep_efficiency_percentage: Option<f64>,
    pub sleep_performance_percentage: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub stage_summary: Option<StageSummary>,
}

/// Stage times are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub total_in_bed_time_milli: Option<i64>,
    pub total_awake_time_milli: Option<i64>,
    pub total_light_sleep_time_milli: Option<i64>,
    pub total_slow_wave_sleep_time_milli: Option<i64>,
    pub total_rem_sleep_time_milli: Option<i64>,
    pub sleep_cycle_count: Option<i64>,
    pub disturbance_count: Option<i64>,
}

impl SleepRecord {
    pub fn stage_summary(&self) -> Option<&StageSummary> {
        self.score.as_ref().and_then(|s| s.stage_summary.as_ref())
    }

    pub fn efficiency_percentage(&self) -> Option<f64> {
        self.score
            .as_ref()
            .and_then(|s| s.sleep_efficiency_percentage)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub id: Option<i64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub score: Option<CycleScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleScore {
    pub strain: Option<f64>,
    pub kilojoule: Option<f64>,
    pub average_heart_rate: Option<u16>,
    pub max_heart_rate: Option<u16>,
}

impl CycleRecord {
    pub fn strain(&self) -> Option<f64> {
        self.score.as_ref().and_then(|s| s.strain)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Option<String>,
    pub sport_id: Option<i64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub score: Option<WorkoutScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutScore {
    pub strain: Option<f64>,
    pub average_heart_rate: Option<u16>,
    pub max_heart_rate: Option<u16>,
    pub kilojoule: Option<f64>,
    pub zone_duration: Option<ZoneDuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDuration {
    pub zone_zero_milli: Option<i64>,
    pub zone_one_milli: Option<i64>,
    pub zone_two_milli: Option<i64>,
    pub zone_three_milli: Option<i64>,
    pub zone_four_milli: Option<i64>,
    pub zone_five_milli: Option<i64>,
}

impl ZoneDuration {
    pub fn as_array(&self) -> [Option<i64>; 6] {
        [
            self.zone_zero_milli,
            self.zone_one_milli,
            self.zone_two_milli,
            self.zone_three_milli,
            self.zone_four_milli,
            self.zone_five_milli,
        ]
    }
}

/// One record of any of the four collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawEvent {
    Recovery(RecoveryRecord),
    Sleep(SleepRecord),
    Cycle(CycleRecord),
    Workout(WorkoutRecord),
}

impl RawEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RawEvent::Recovery(_) => EventKind::Recovery,
            RawEvent::Sleep(_) => EventKind::Sleep,
            RawEvent::Cycle(_) => EventKind::Cycle,
            RawEvent::Workout(_) => EventKind::Workout,
        }
    }
}

/// The four collections fetched for a request window, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStreams {
    #[serde(default)]
    pub recovery: Vec<RecoveryRecord>,
    #[serde(default)]
    pub sleep: Vec<SleepRecord>,
    #[serde(default)]
    pub cycle: Vec<CycleRecord>,
    #[serde(default)]
    pub workout: Vec<WorkoutRecord>,
}

impl RawStreams {
    pub fn push(&mut self, event: RawEvent) {
        match event {
            RawEvent::Recovery(r) => self.recovery.push(r),
            RawEvent::Sleep(s) => self.sleep.push(s),
            RawEvent::Cycle(c) => self.cycle.push(c),
            RawEvent::Workout(w) => self.workout.push(w),
        }
    }

    pub fn len(&self) -> usize {
        self.recovery.len() + self.sleep.len() + self.cycle.len() + self.workout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<RawEvent> for RawStreams {
    fn from_iter<T: IntoIterator<Item = RawEvent>>(iter: T) -> Self {
        let mut streams = RawStreams::default();
        for event in iter {
            streams.push(event);
        }
        streams
    }
}
