#[macro_use]
extern crate log;

mod error;
pub use error::DigestError;

pub(crate) mod time_align;
pub use time_align::{AlignedInstant, TimeAligner};

pub(crate) mod sleep_merge;
pub use sleep_merge::{SleepAggregate, SleepSession, SleepSessionMerger, SleepStages};

pub(crate) mod workout;
pub use workout::{WorkoutSummarizer, zone_shares};

pub(crate) mod aggregate;
pub use aggregate::{Aggregation, DailyAggregator, DateWindow, DuplicatePolicy, RejectedEvent};

pub(crate) mod series;
pub use series::DailySeries;

pub(crate) mod trend;
pub use trend::TrendAnalyzer;

pub(crate) mod patterns;
pub use patterns::PatternDetector;

pub(crate) mod analyzer;
pub use analyzer::DigestAnalyzer;

pub mod helpers;

use chrono::TimeZone;
use whoop_digest_types::{AnalyticsReport, DailySummary, RawStreams};

/// Joins the raw collections onto `window`, newest day first.
pub fn aggregate<Tz: TimeZone>(
    streams: &RawStreams,
    window: &DateWindow,
    tz: Tz,
) -> Vec<DailySummary> {
    DailyAggregator::new(tz).aggregate(streams, window)
}

/// Builds the analytics report for an aggregated sequence, in any order.
pub fn analyze(days: &[DailySummary]) -> AnalyticsReport {
    DigestAnalyzer::new(days).analyze()
}
