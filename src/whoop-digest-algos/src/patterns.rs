use whoop_digest_types::{FocusArea, Pattern};

use crate::{DailySeries, helpers::stats::mean_opt};

/// Recovery below this is low, above `STRONG_RECOVERY` strong.
pub(crate) const LOW_RECOVERY: f64 = 33.0;
pub(crate) const STRONG_RECOVERY: f64 = 66.0;
const FOCUS_RECOVERY: f64 = 50.0;
/// Seven hours.
const SLEEP_DEFICIT_MINUTES: f64 = 420.0;
const HIGH_STRAIN: f64 = 15.0;
const HIGH_STRAIN_RUN: usize = 3;

/// Threshold rules over the means and day strains of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDetector {
    mean_recovery: Option<f64>,
    mean_sleep: Option<f64>,
    /// Non-null day strains, oldest first.
    day_strains: Vec<f64>,
}

impl PatternDetector {
    pub fn new(mean_recovery: Option<f64>, mean_sleep: Option<f64>, day_strains: Vec<f64>) -> Self {
        Self {
            mean_recovery,
            mean_sleep,
            day_strains,
        }
    }

    pub fn from_series(series: &DailySeries) -> Self {
        Self::new(
            mean_opt(&DailySeries::valid(&series.recovery)),
            mean_opt(&DailySeries::valid(&series.sleep_duration)),
            DailySeries::valid(&series.day_strain),
        )
    }

    pub fn patterns(&self) -> Vec<Pattern> {
        let mut patterns = Vec::new();

        match self.mean_recovery {
            Some(r) if r < LOW_RECOVERY => patterns.push(Pattern::LowRecoveryOvertrainingRisk),
            Some(r) if r > STRONG_RECOVERY => patterns.push(Pattern::StrongRecoveryAdaptation),
            _ => {}
        }

        if self.mean_sleep.is_some_and(|s| s < SLEEP_DEFICIT_MINUTES) {
            patterns.push(Pattern::SleepDeficit);
        }

        if self.has_consecutive_high_strain() {
            patterns.push(Pattern::ConsecutiveHighStrain);
        }

        patterns
    }

    pub fn focus_areas(&self) -> Vec<FocusArea> {
        let mut areas = Vec::new();

        if self.mean_recovery.is_some_and(|r| r < FOCUS_RECOVERY) {
            areas.push(FocusArea::PrioritizeRecovery);
        }

        if self.mean_sleep.is_some_and(|s| s < SLEEP_DEFICIT_MINUTES) {
            areas.push(FocusArea::IncreaseSleep);
        }

        let high_days = self.day_strains.iter().filter(|s| **s > HIGH_STRAIN).count();
        if !self.day_strains.is_empty() && high_days * 2 > self.day_strains.len() {
            areas.push(FocusArea::AddLowIntensityDays);
        }

        areas
    }

    /// Whether at least three strains in a row exceed 15.
    pub fn has_consecutive_high_strain(&self) -> bool {
        let mut run = 0;
        for strain in &self.day_strains {
            if *strain > HIGH_STRAIN {
                run += 1;
                if run >= HIGH_STRAIN_RUN {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strains(values: &[f64]) -> PatternDetector {
        PatternDetector::new(None, None, values.to_vec())
    }

    #[test]
    fn consecutive_high_strain() {
        assert!(strains(&[16.0, 17.0, 18.0]).has_consecutive_high_strain());
        assert!(!strains(&[16.0, 17.0, 5.0, 18.0]).has_consecutive_high_strain());
        assert!(strains(&[3.0, 16.0, 17.0, 18.0, 2.0]).has_consecutive_high_strain());
        // 15 itself is not high
        assert!(!strains(&[15.0, 16.0, 17.0]).has_consecutive_high_strain());
        assert!(!strains(&[]).has_consecutive_high_strain());

        assert_eq!(
            strains(&[16.0, 17.0, 18.0]).patterns(),
            vec![Pattern::ConsecutiveHighStrain]
        );
    }

    #[test]
    fn recovery_patterns() {
        let low = PatternDetector::new(Some(30.0), None, vec![]);
        assert_eq!(low.patterns(), vec![Pattern::LowRecoveryOvertrainingRisk]);
        assert_eq!(low.focus_areas(), vec![FocusArea::PrioritizeRecovery]);

        let strong = PatternDetector::new(Some(70.0), None, vec![]);
        assert_eq!(strong.patterns(), vec![Pattern::StrongRecoveryAdaptation]);
        assert!(strong.focus_areas().is_empty());

        // between the pattern thresholds but under the focus threshold
        let middling = PatternDetector::new(Some(45.0), None, vec![]);
        assert!(middling.patterns().is_empty());
        assert_eq!(middling.focus_areas(), vec![FocusArea::PrioritizeRecovery]);
    }

    #[test]
    fn sleep_deficit() {
        let short = PatternDetector::new(None, Some(400.0), vec![]);
        assert_eq!(short.patterns(), vec![Pattern::SleepDeficit]);
        assert_eq!(short.focus_areas(), vec![FocusArea::IncreaseSleep]);

        let enough = PatternDetector::new(None, Some(420.0), vec![]);
        assert!(enough.patterns().is_empty());
    }

    #[test]
    fn low_intensity_focus_needs_majority() {
        assert_eq!(
            strains(&[16.0, 4.0, 17.0]).focus_areas(),
            vec![FocusArea::AddLowIntensityDays]
        );
        assert!(strains(&[16.0, 4.0, 17.0, 5.0]).focus_areas().is_empty());
    }

    #[test]
    fn nothing_without_data() {
        let empty = PatternDetector::from_series(&DailySeries::default());
        assert!(empty.patterns().is_empty());
        assert!(empty.focus_areas().is_empty());
    }
}
