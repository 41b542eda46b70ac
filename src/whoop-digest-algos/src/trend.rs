use whoop_digest_types::{IntensityDistribution, TrendDirection};

use crate::helpers::stats::{diffs, linear_slope, pearson, range, round_float, std_dev};

/// Statistics over a single metric column, nulls already removed.
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Slope (per day) a trend has to exceed to count as a direction.
    pub const SLOPE_THRESHOLD: f64 = 0.1;

    pub const SLEEP_TARGET_MINUTES: f64 = 480.0;

    /// Ideal REM, deep and light shares of total sleep.
    const IDEAL_STAGE_SHARES: [f64; 3] = [0.25, 0.20, 0.55];
    const STAGE_WEIGHTS: [f64; 3] = [0.35, 0.35, 0.30];

    const MODERATE_STRAIN: f64 = 8.0;
    const HIGH_STRAIN: f64 = 14.0;

    pub fn trend_direction(values: &[f64]) -> TrendDirection {
        match linear_slope(values) {
            None => TrendDirection::InsufficientData,
            Some(slope) if slope > Self::SLOPE_THRESHOLD => TrendDirection::Improving,
            Some(slope) if slope < -Self::SLOPE_THRESHOLD => TrendDirection::Declining,
            Some(_) => TrendDirection::Stable,
        }
    }

    /// `1 - std(day to day changes) / range`, within `[0, 1]`. A flat series is
    /// perfectly consistent; fewer than two values score 0.
    pub fn consistency_score(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }

        let range = range(values);
        if range == 0.0 {
            return 1.0;
        }

        (1.0 - std_dev(&diffs(values)) / range).clamp(0.0, 1.0)
    }

    /// Minutes short of the 8 hour target, summed over all nights.
    pub fn sleep_debt(durations: &[f64]) -> f64 {
        durations
            .iter()
            .map(|d| (Self::SLEEP_TARGET_MINUTES - d).max(0.0))
            .sum()
    }

    /// 0-100 closeness of the observed stage mix to the ideal one.
    pub fn sleep_quality_score(rem: &[f64], deep: &[f64], light: &[f64]) -> Option<f64> {
        if rem.is_empty() || deep.is_empty() || light.is_empty() {
            return None;
        }

        let totals = [rem, deep, light].map(|s| s.iter().sum::<f64>());
        let total = totals.iter().sum::<f64>();
        if total == 0.0 {
            return None;
        }

        let score = totals
            .iter()
            .zip(Self::IDEAL_STAGE_SHARES)
            .zip(Self::STAGE_WEIGHTS)
            .map(|((stage, ideal), weight)| weight * (1.0 - (ideal - stage / total).abs()))
            .sum::<f64>();

        Some(round_float(score * 100.0))
    }

    pub fn correlation(pairs: &[(f64, f64)]) -> Option<f64> {
        pearson(pairs)
    }

    /// Buckets below 8, from 8 up to 14, and 14 or more.
    pub fn intensity_distribution(values: &[f64]) -> IntensityDistribution {
        values
            .iter()
            .fold(IntensityDistribution::default(), |mut dist, v| {
                if *v < Self::MODERATE_STRAIN {
                    dist.low += 1;
                } else if *v < Self::HIGH_STRAIN {
                    dist.moderate += 1;
                } else {
                    dist.high += 1;
                }
                dist
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_directions() {
        assert_eq!(TrendAnalyzer::trend_direction(&[10.0, 20.0, 30.0]), TrendDirection::Improving);
        assert_eq!(TrendAnalyzer::trend_direction(&[30.0, 20.0, 10.0]), TrendDirection::Declining);
        assert_eq!(TrendAnalyzer::trend_direction(&[20.0, 20.0, 20.0]), TrendDirection::Stable);
        assert_eq!(TrendAnalyzer::trend_direction(&[20.0]), TrendDirection::InsufficientData);
        assert_eq!(TrendAnalyzer::trend_direction(&[]), TrendDirection::InsufficientData);
    }

    #[test]
    fn small_slopes_are_stable() {
        // slope 0.05 per day
        assert_eq!(
            TrendAnalyzer::trend_direction(&[50.0, 50.05, 50.1, 50.15]),
            TrendDirection::Stable
        );
    }

    #[test]
    fn consistency_edge_cases() {
        assert_eq!(TrendAnalyzer::consistency_score(&[50.0, 50.0, 50.0]), 1.0);
        assert_eq!(TrendAnalyzer::consistency_score(&[50.0]), 0.0);
        assert_eq!(TrendAnalyzer::consistency_score(&[]), 0.0);
        // constant steps: no variation in the differences
        assert_eq!(TrendAnalyzer::consistency_score(&[10.0, 20.0, 30.0]), 1.0);
    }

    #[test]
    fn consistency_penalizes_swings() {
        let steady = TrendAnalyzer::consistency_score(&[60.0, 62.0, 61.0, 63.0, 62.0]);
        let erratic = TrendAnalyzer::consistency_score(&[20.0, 90.0, 25.0, 85.0, 30.0]);
        assert!(erratic < steady, "{erratic} should be below {steady}");
        assert!((0.0..=1.0).contains(&erratic));
    }

    #[test]
    fn sleep_debt_only_counts_shortfall() {
        assert_eq!(TrendAnalyzer::sleep_debt(&[420.0, 500.0, 480.0, 360.0]), 180.0);
        assert_eq!(TrendAnalyzer::sleep_debt(&[]), 0.0);
    }

    #[test]
    fn sleep_quality_ideal_mix_scores_100() {
        let score = TrendAnalyzer::sleep_quality_score(&[50.0, 50.0], &[40.0, 40.0], &[110.0, 110.0]);
        assert_eq!(score, Some(100.0));
    }

    #[test]
    fn sleep_quality_skewed_mix() {
        // all light sleep: rem off by 0.25, deep by 0.20, light by 0.45
        let score = TrendAnalyzer::sleep_quality_score(&[0.0], &[0.0], &[400.0]).unwrap();
        let expected = 100.0 * (0.35 * 0.75 + 0.35 * 0.80 + 0.30 * 0.55);
        assert!((score - round_float(expected)).abs() < 1e-9);
    }

    #[test]
    fn sleep_quality_missing_data() {
        assert_eq!(TrendAnalyzer::sleep_quality_score(&[], &[10.0], &[10.0]), None);
        assert_eq!(TrendAnalyzer::sleep_quality_score(&[0.0], &[0.0], &[0.0]), None);
    }

    #[test]
    fn correlation_of_linear_pairs() {
        let pairs = (1..=5)
            .map(|s| {
                let strain = s as f64 * 3.0;
                (strain * 2.0, strain)
            })
            .collect::<Vec<_>>();
        let r = TrendAnalyzer::correlation(&pairs).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
        assert_eq!(TrendAnalyzer::correlation(&pairs[..1]), None);
    }

    #[test]
    fn intensity_buckets() {
        let dist = TrendAnalyzer::intensity_distribution(&[0.0, 7.99, 8.0, 13.9, 14.0, 20.5]);
        assert_eq!(
            dist,
            IntensityDistribution {
                low: 2,
                moderate: 2,
                high: 2
            }
        );
    }
}
