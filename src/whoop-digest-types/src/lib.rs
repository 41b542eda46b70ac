pub mod raw;
pub use raw::{
    CycleRecord, CycleScore, EventKind, RawEvent, RawStreams, RecoveryRecord, RecoveryScore,
    SleepRecord, SleepScore, StageSummary, WorkoutRecord, WorkoutScore, ZoneDuration,
};

pub mod sport;
pub use sport::{Sport, sport_name};

pub mod summary;
pub use summary::{DailySleepRecord, DailySummary, StrainData, WorkoutEntry, ZONE_COUNT};

pub mod report;
pub use report::{
    AnalyticsReport, Correlations, FocusArea, IntensityDistribution, Pattern, RecoveryStats,
    SleepQuality, SleepStats, StrainStats, TimePeriod, TrendDirection, TrendsAndPatterns,
    WorkoutStats,
};
