use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Offset as _, TimeZone, Utc};

use crate::DigestError;

/// Offset-less layouts, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedInstant {
    pub utc: DateTime<Utc>,
    /// Calendar date in the aligner's timezone.
    pub date: NaiveDate,
}

/// Converts source timestamps into a display timezone and buckets them by
/// local calendar date.
#[derive(Debug, Clone)]
pub struct TimeAligner<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> TimeAligner<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, DigestError> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(naive.and_utc());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }

        Err(DigestError::InvalidTimestamp(raw.to_string()))
    }

    pub fn align(&self, raw: &str) -> Result<AlignedInstant, DigestError> {
        let utc = Self::parse(raw)?;
        Ok(AlignedInstant {
            utc,
            date: self.calendar_date(&utc),
        })
    }

    pub fn align_field(
        &self,
        raw: Option<&str>,
        field: &'static str,
    ) -> Result<AlignedInstant, DigestError> {
        self.align(raw.ok_or(DigestError::MissingField(field))?)
    }

    pub fn calendar_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// First instant of `date` in local time.
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.tz.from_local_datetime(&midnight).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => {
                // Local midnight skipped by a DST jump.
                let offset = self.tz.offset_from_utc_datetime(&midnight).fix();
                (midnight - offset).and_utc()
            }
        }
    }

    /// First instant after `date` in local time.
    pub fn day_end(&self, date: NaiveDate) -> DateTime<Utc> {
        self.day_start(date.succ_opt().unwrap_or(NaiveDate::MAX))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeDelta};

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn parse_accepted_layouts() {
        let expected = utc(2024, 3, 2, 3, 12);
        type A = TimeAligner<Utc>;
        assert_eq!(A::parse("2024-03-02T03:12:00.000Z").unwrap(), expected);
        assert_eq!(A::parse("2024-03-02T04:12:00+01:00").unwrap(), expected);
        assert_eq!(A::parse("2024-03-02T03:12:00").unwrap(), expected);
        assert_eq!(A::parse("2024-03-02 03:12:00.250").unwrap(), expected + TimeDelta::milliseconds(250));
        assert_eq!(A::parse("2024-03-02").unwrap(), utc(2024, 3, 2, 0, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = TimeAligner::<Utc>::parse("yesterday-ish").unwrap_err();
        assert_eq!(err, DigestError::InvalidTimestamp("yesterday-ish".into()));
        assert!(TimeAligner::<Utc>::parse("2024-13-40T00:00:00Z").is_err());
    }

    #[test]
    fn align_uses_local_date() {
        let aligner = TimeAligner::new(FixedOffset::west_opt(5 * 3600).unwrap());
        // 03:00 UTC is 22:00 the previous evening at UTC-5
        let aligned = aligner.align("2024-03-02T03:00:00Z").unwrap();
        assert_eq!(aligned.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(aligned.utc, utc(2024, 3, 2, 3, 0));
    }

    #[test]
    fn align_missing_field() {
        let aligner = TimeAligner::new(Utc);
        assert_eq!(
            aligner.align_field(None, "start").unwrap_err(),
            DigestError::MissingField("start")
        );
    }

    #[test]
    fn day_bounds_follow_offset() {
        let aligner = TimeAligner::new(FixedOffset::east_opt(2 * 3600).unwrap());
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(aligner.day_start(date), utc(2024, 3, 1, 22, 0));
        assert_eq!(aligner.day_end(date), utc(2024, 3, 2, 22, 0));
    }

    #[test]
    fn day_bounds_across_dst() {
        let aligner = TimeAligner::new(chrono_tz::America::New_York);
        // Clocks spring forward on 2024-03-10, so the day lasts 23 hours.
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(aligner.day_start(date), utc(2024, 3, 10, 5, 0));
        assert_eq!(aligner.day_end(date) - aligner.day_start(date), TimeDelta::hours(23));
    }
}
