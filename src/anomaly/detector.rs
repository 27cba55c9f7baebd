use rand::Rng;
use rand_distr::StandardNormal;
use thiserror::Error;

use super::forest::{IsolationForest, percentile};

pub const BASELINE_SAMPLE_COUNT: usize = 100;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectorError {
    #[error("contamination must be between 0 and 1, got {0}")]
    InvalidContamination(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Normal,
    Outlier,
    /// The reading could not be parsed as a finite number.
    InvalidInput(String),
}

impl Classification {
    /// Unparseable readings count as anomalous.
    pub fn is_anomalous(&self) -> bool {
        !matches!(self, Classification::Normal)
    }
}

/// One-dimensional outlier classifier calibrated on synthetic baseline data.
///
/// A fitted detector is immutable; changing the contamination means fitting a
/// new one and replacing the shared handle.
#[derive(Debug)]
pub struct AnomalyDetector {
    forest: IsolationForest,
    contamination: f64,
    score_threshold: f64,
}

impl AnomalyDetector {
    /// Fits against fresh standard-normal samples, so successive fits differ.
    pub fn fit(contamination: f64) -> Result<Self, DetectorError> {
        Self::fit_with_rng(contamination, &mut rand::thread_rng())
    }

    pub fn fit_with_rng<R: Rng>(contamination: f64, rng: &mut R) -> Result<Self, DetectorError> {
        let baseline: Vec<f64> = (0..BASELINE_SAMPLE_COUNT)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        Self::fit_on(&baseline, contamination, rng)
    }

    pub(crate) fn fit_on<R: Rng>(
        baseline: &[f64],
        contamination: f64,
        rng: &mut R,
    ) -> Result<Self, DetectorError> {
        if !contamination.is_finite() || !(0.0..=1.0).contains(&contamination) {
            return Err(DetectorError::InvalidContamination(contamination));
        }

        let forest = IsolationForest::fit(baseline, rng);
        let mut scores: Vec<f64> = baseline.iter().map(|value| forest.score(*value)).collect();
        scores.sort_by(f64::total_cmp);
        let score_threshold = percentile(&scores, 100.0 * (1.0 - contamination));

        Ok(Self {
            forest,
            contamination,
            score_threshold,
        })
    }

    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    pub fn classify(&self, raw: &str) -> Classification {
        let value = match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => return Classification::InvalidInput(raw.to_string()),
        };

        if self.forest.score(value) > self.score_threshold {
            Classification::Outlier
        } else {
            Classification::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{AnomalyDetector, Classification, DetectorError};

    fn seeded(contamination: f64) -> AnomalyDetector {
        let mut rng = StdRng::seed_from_u64(42);
        AnomalyDetector::fit_with_rng(contamination, &mut rng).expect("fit should succeed")
    }

    #[test]
    fn non_numeric_input_is_anomalous_and_flagged_invalid() {
        let detector = seeded(0.1);

        let verdict = detector.classify("abc");
        assert_eq!(verdict, Classification::InvalidInput("abc".to_string()));
        assert!(verdict.is_anomalous());
    }

    #[test]
    fn non_finite_input_is_invalid() {
        let detector = seeded(0.1);

        assert!(matches!(detector.classify("NaN"), Classification::InvalidInput(_)));
        assert!(matches!(detector.classify("inf"), Classification::InvalidInput(_)));
    }

    #[test]
    fn centre_of_baseline_is_normal_and_far_value_is_outlier() {
        let detector = seeded(0.1);

        assert_eq!(detector.classify("0.0"), Classification::Normal);
        assert_eq!(detector.classify("50"), Classification::Outlier);
        assert_eq!(detector.classify("-50"), Classification::Outlier);
    }

    #[test]
    fn rejects_contamination_outside_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let error = AnomalyDetector::fit_with_rng(1.5, &mut rng).expect_err("must reject");
        assert_eq!(error, DetectorError::InvalidContamination(1.5));
    }

    #[test]
    fn contamination_controls_share_of_flagged_baseline_points() {
        let mut rng = StdRng::seed_from_u64(11);
        let baseline: Vec<f64> = (0..100).map(|index| (index as f64 - 50.0) / 10.0).collect();
        let detector = AnomalyDetector::fit_on(&baseline, 0.2, &mut rng).expect("fit should succeed");

        let flagged = baseline
            .iter()
            .filter(|value| detector.classify(&value.to_string()).is_anomalous())
            .count();
        assert!(flagged <= 20, "flagged {flagged} of 100");
        assert!(flagged >= 10, "flagged {flagged} of 100");
        assert!((detector.contamination() - 0.2).abs() < f64::EPSILON);
    }
}
