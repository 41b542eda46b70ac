use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use whoop_digest_types::{DailySleepRecord, SleepRecord, StageSummary};

use crate::{
    DigestError, TimeAligner,
    helpers::stats::{round_float, round_whole},
};

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Stage composition of one or more sessions, in minutes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SleepStages {
    pub disturbance_count: f64,
    pub efficiency_percentage: f64,
    pub awake_minutes: f64,
    pub light_minutes: f64,
    pub deep_minutes: f64,
    pub rem_minutes: f64,
    pub sleep_cycle_count: f64,
}

impl SleepStages {
    pub fn from_record(record: &SleepRecord) -> Self {
        let summary = record.stage_summary();
        let count = |field: fn(&StageSummary) -> Option<i64>| {
            summary.and_then(field).unwrap_or_default() as f64
        };
        let minutes = |field: fn(&StageSummary) -> Option<i64>| count(field) / MILLIS_PER_MINUTE;

        Self {
            disturbance_count: count(|s| s.disturbance_count),
            efficiency_percentage: record.efficiency_percentage().unwrap_or_default(),
            awake_minutes: minutes(|s| s.total_awake_time_milli),
            light_minutes: minutes(|s| s.total_light_sleep_time_milli),
            deep_minutes: minutes(|s| s.total_slow_wave_sleep_time_milli),
            rem_minutes: minutes(|s| s.total_rem_sleep_time_milli),
            sleep_cycle_count: count(|s| s.sleep_cycle_count),
        }
    }

    /// Sums the counters and keeps the best efficiency.
    fn absorb(&mut self, other: &SleepStages) {
        self.disturbance_count += other.disturbance_count;
        self.efficiency_percentage = self.efficiency_percentage.max(other.efficiency_percentage);
        self.awake_minutes += other.awake_minutes;
        self.light_minutes += other.light_minutes;
        self.deep_minutes += other.deep_minutes;
        self.rem_minutes += other.rem_minutes;
        self.sleep_cycle_count += other.sleep_cycle_count;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SleepSession {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub stages: SleepStages,
}

impl SleepSession {
    pub fn from_record<Tz: TimeZone>(
        record: &SleepRecord,
        aligner: &TimeAligner<Tz>,
    ) -> Result<Self, DigestError> {
        let start = aligner.align_field(record.start.as_deref(), "start")?;
        let end = aligner.align_field(record.end.as_deref(), "end")?;

        if end.utc < start.utc {
            return Err(DigestError::InvertedInterval {
                start: start.utc,
                end: end.utc,
            });
        }

        Ok(Self {
            start: start.utc,
            end: end.utc,
            start_date: start.date,
            end_date: end.date,
            stages: SleepStages::from_record(record),
        })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Unrounded sleep totals for one date.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SleepAggregate {
    pub total_minutes: f64,
    pub stages: SleepStages,
}

impl SleepAggregate {
    pub fn to_record(&self) -> DailySleepRecord {
        DailySleepRecord {
            total_duration_minutes: round_whole(self.total_minutes),
            disturbance_count: round_whole(self.stages.disturbance_count),
            efficiency_percentage: round_float(self.stages.efficiency_percentage),
            awake_minutes: round_whole(self.stages.awake_minutes),
            light_minutes: round_whole(self.stages.light_minutes),
            deep_minutes: round_whole(self.stages.deep_minutes),
            rem_minutes: round_whole(self.stages.rem_minutes),
            sleep_cycle_count: round_whole(self.stages.sleep_cycle_count),
        }
    }
}

/// Collapses the sleep sessions touching a date into one duration.
///
/// A session is attributed to the local date it starts on, clipped at the end
/// of that date; whatever runs past midnight is credited to the date it ends
/// on. Overlapping time within a date is counted once.
pub struct SleepSessionMerger<'a, Tz: TimeZone> {
    aligner: &'a TimeAligner<Tz>,
}

impl<'a, Tz: TimeZone> SleepSessionMerger<'a, Tz> {
    pub fn new(aligner: &'a TimeAligner<Tz>) -> Self {
        Self { aligner }
    }

    pub fn merge(&self, sessions: &[SleepSession]) -> BTreeMap<NaiveDate, SleepAggregate> {
        let mut by_date: BTreeMap<NaiveDate, (Vec<&SleepSession>, Vec<&SleepSession>)> =
            BTreeMap::new();

        for session in sessions {
            by_date.entry(session.start_date).or_default().0.push(session);

            if session.end_date > session.start_date
                && session.end > self.aligner.day_start(session.end_date)
            {
                by_date.entry(session.end_date).or_default().1.push(session);
            }
        }

        by_date
            .into_iter()
            .map(|(date, (same_day, carried_over))| {
                (date, self.merge_day(date, &same_day, &carried_over))
            })
            .collect()
    }

    /// `same_day` started on `date`; `carried_over` started earlier and end on it.
    pub fn merge_day(
        &self,
        date: NaiveDate,
        same_day: &[&SleepSession],
        carried_over: &[&SleepSession],
    ) -> SleepAggregate {
        let day_start = self.aligner.day_start(date);
        let day_end = self.aligner.day_end(date);

        let mut intervals = carried_over
            .iter()
            .filter(|s| s.end > day_start)
            .map(|s| (day_start, s.end.min(day_end)))
            .chain(same_day.iter().map(|s| (s.start, s.end.min(day_end))))
            .collect::<Vec<_>>();
        intervals.sort_by_key(|(start, _)| *start);

        let mut covered_until: Option<DateTime<Utc>> = None;
        let mut total = TimeDelta::zero();
        for (start, end) in intervals {
            match covered_until {
                Some(last) if start <= last => {
                    if end > last {
                        total += end - last;
                    }
                }
                _ => total += end - start,
            }
            covered_until = Some(covered_until.map_or(end, |last| last.max(end)));
        }

        let mut stages = SleepStages::default();
        for session in same_day {
            stages.absorb(&session.stages);
        }

        trace!(
            "{date}: {} sessions, {} carried over, {} min",
            same_day.len(),
            carried_over.len(),
            total.num_minutes()
        );

        SleepAggregate {
            total_minutes: total.num_milliseconds() as f64 / MILLIS_PER_MINUTE,
            stages,
        }
    }
}
