use std::collections::HashMap;

use chrono::{Days, NaiveDate, TimeZone};
use strum::{Display, EnumString};
use whoop_digest_types::{DailySummary, EventKind, RawStreams, StrainData};

use crate::{
    DigestError, SleepSession, SleepSessionMerger, TimeAligner, WorkoutSummarizer,
    helpers::stats::round_float,
};

/// Half-open `[start, end)` range of local calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub const DEFAULT_DAYS: u32 = 7;

    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DigestError> {
        if end < start {
            return Err(DigestError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn days_from(start: NaiveDate, days: u32) -> Self {
        let end = start
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// `days` long window starting at `requested_start`, pulled back so that it
    /// never extends past `today`. Without a requested start the window ends
    /// with `today`.
    pub fn trailing(requested_start: Option<NaiveDate>, today: NaiveDate, days: u32) -> Self {
        let days = days.max(1);
        let latest_start = today
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);

        let start = match requested_start {
            Some(start) if start <= latest_start => start,
            _ => latest_start,
        };

        Self::days_from(start, days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First date after the window.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Dates of the window, oldest first.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len() as u64).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }
}

/// How several recovery or strain values on one date are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The last non-null value in source order.
    #[default]
    LastWins,
    Mean,
}

#[derive(Debug, Default)]
struct DateValue {
    last: Option<f64>,
    sum: f64,
    count: usize,
}

impl DateValue {
    fn push(&mut self, value: f64) {
        self.last = Some(value);
        self.sum += value;
        self.count += 1;
    }

    fn resolve(&self, policy: DuplicatePolicy) -> Option<f64> {
        match policy {
            DuplicatePolicy::LastWins => self.last,
            DuplicatePolicy::Mean => (self.count > 0).then(|| self.sum / self.count as f64),
        }
    }
}

/// A source record left out of the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEvent {
    pub kind: EventKind,
    /// Position within its collection.
    pub index: usize,
    pub error: DigestError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Newest first.
    pub days: Vec<DailySummary>,
    pub rejected: Vec<RejectedEvent>,
}

/// Joins the four WHOOP collections onto a date window.
pub struct DailyAggregator<Tz: TimeZone> {
    aligner: TimeAligner<Tz>,
    policy: DuplicatePolicy,
}

impl<Tz: TimeZone> DailyAggregator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            aligner: TimeAligner::new(tz),
            policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn aggregate(&self, streams: &RawStreams, window: &DateWindow) -> Vec<DailySummary> {
        let Aggregation { days, rejected } = self.aggregate_detailed(streams, window);
        for event in &rejected {
            warn!("dropped {} record #{}: {}", event.kind, event.index, event.error);
        }
        days
    }

    pub fn aggregate_detailed(&self, streams: &RawStreams, window: &DateWindow) -> Aggregation {
        let mut rejected = Vec::new();

        let recovery = self.values_by_date(
            EventKind::Recovery,
            streams
                .recovery
                .iter()
                .map(|r| (r.created_at.as_deref(), "created_at", r.recovery_score())),
            &mut rejected,
        );

        let strain = self.values_by_date(
            EventKind::Cycle,
            streams
                .cycle
                .iter()
                .map(|c| (c.start.as_deref(), "start", c.strain())),
            &mut rejected,
        );

        let mut sessions = Vec::with_capacity(streams.sleep.len());
        for (index, record) in streams.sleep.iter().enumerate() {
            match SleepSession::from_record(record, &self.aligner) {
                Ok(session) => sessions.push(session),
                Err(error) => rejected.push(RejectedEvent {
                    kind: EventKind::Sleep,
                    index,
                    error,
                }),
            }
        }
        let sleep = SleepSessionMerger::new(&self.aligner).merge(&sessions);

        let mut workouts =
            WorkoutSummarizer::new(&self.aligner).group_by_day(&streams.workout, &mut rejected);

        let days = window
            .dates()
            .rev()
            .map(|date| DailySummary {
                date,
                recovery_score: recovery
                    .get(&date)
                    .and_then(|v| v.resolve(self.policy))
                    .map(round_float),
                sleep: sleep.get(&date).map(|s| s.to_record()),
                strain: StrainData {
                    day_strain: strain
                        .get(&date)
                        .and_then(|v| v.resolve(self.policy))
                        .map(round_float),
                    workouts: workouts.remove(&date).unwrap_or_default(),
                },
            })
            .collect::<Vec<_>>();

        debug!(
            "aggregated {} days from {} to {} ({} records, {} rejected)",
            days.len(),
            window.start(),
            window.end(),
            streams.len(),
            rejected.len()
        );

        Aggregation { days, rejected }
    }

    fn values_by_date<'r>(
        &self,
        kind: EventKind,
        records: impl Iterator<Item = (Option<&'r str>, &'static str, Option<f64>)>,
        rejected: &mut Vec<RejectedEvent>,
    ) -> HashMap<NaiveDate, DateValue> {
        let mut by_date: HashMap<NaiveDate, DateValue> = HashMap::new();

        for (index, (timestamp, field, value)) in records.enumerate() {
            let anchor = match self.aligner.align_field(timestamp, field) {
                Ok(anchor) => anchor,
                Err(error) => {
                    rejected.push(RejectedEvent { kind, index, error });
                    continue;
                }
            };

            let entry = by_date.entry(anchor.date).or_default();
            if let Some(value) = value {
                entry.push(value);
            }
        }

        by_date
    }
}
