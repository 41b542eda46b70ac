use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use whoop_digest_types::{EventKind, WorkoutEntry, WorkoutRecord, ZONE_COUNT, sport_name};

use crate::{
    DigestError, RejectedEvent, TimeAligner,
    helpers::stats::{round_float, round_whole},
};

/// Code used when a workout carries no sport id.
const DEFAULT_SPORT_ID: i64 = -1;

/// Turns workout records into per-day [`WorkoutEntry`] lists.
pub struct WorkoutSummarizer<'a, Tz: TimeZone> {
    aligner: &'a TimeAligner<Tz>,
}

impl<'a, Tz: TimeZone> WorkoutSummarizer<'a, Tz> {
    pub fn new(aligner: &'a TimeAligner<Tz>) -> Self {
        Self { aligner }
    }

    /// Local start date and entry of one workout.
    pub fn summarize(&self, record: &WorkoutRecord) -> Result<(NaiveDate, WorkoutEntry), DigestError> {
        let start = self.aligner.align_field(record.start.as_deref(), "start")?;
        let end = record
            .end
            .as_deref()
            .map(|raw| self.aligner.align(raw))
            .transpose()?;

        if let Some(end) = end {
            if end.utc < start.utc {
                return Err(DigestError::InvertedInterval {
                    start: start.utc,
                    end: end.utc,
                });
            }
        }

        let duration_minutes = end.map(|end| {
            round_whole((end.utc - start.utc).num_milliseconds() as f64 / 60_000.0)
        });

        let score = record.score.as_ref();
        let zone_duration_millis = score
            .and_then(|s| s.zone_duration.as_ref())
            .map(|z| z.as_array())
            .unwrap_or_default();

        let sport_id = record.sport_id.unwrap_or(DEFAULT_SPORT_ID);

        let entry = WorkoutEntry {
            sport_id,
            sport_name: sport_name(sport_id).to_string(),
            strain: score.and_then(|s| s.strain).map(round_float),
            avg_hr: score.and_then(|s| s.average_heart_rate),
            max_hr: score.and_then(|s| s.max_heart_rate),
            duration_minutes,
            zone_share_percentages: zone_shares(&zone_duration_millis),
            zone_duration_millis,
        };

        Ok((start.date, entry))
    }

    /// Groups workouts by local start date, keeping source order within a day.
    /// Records that cannot be placed are appended to `rejected`.
    pub fn group_by_day(
        &self,
        records: &[WorkoutRecord],
        rejected: &mut Vec<RejectedEvent>,
    ) -> BTreeMap<NaiveDate, Vec<WorkoutEntry>> {
        let mut days: BTreeMap<NaiveDate, Vec<WorkoutEntry>> = BTreeMap::new();

        for (index, record) in records.iter().enumerate() {
            match self.summarize(record) {
                Ok((date, entry)) => days.entry(date).or_default().push(entry),
                Err(error) => rejected.push(RejectedEvent {
                    kind: EventKind::Workout,
                    index,
                    error,
                }),
            }
        }

        days
    }
}

/// Share of total zone time per zone, in percent. `None` without zone time.
pub fn zone_shares(zones: &[Option<i64>; ZONE_COUNT]) -> Option<[f64; ZONE_COUNT]> {
    let total = zones.iter().flatten().sum::<i64>();
    if total <= 0 {
        return None;
    }

    Some((*zones).map(|z| round_float(z.unwrap_or_default() as f64 / total as f64 * 100.0)))
}
