use serde::{Deserialize, Serialize};

use crate::errors::{MatchError, Result};
use crate::models::matching::SubScores;

/// Allowed drift from 1.0 when validating a weight override.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Factor weights for the composite score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub text_similarity: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.30,
            education: 0.20,
            text_similarity: 0.10,
        }
    }
}

impl MatchWeights {
    /// Builds and validates an override.
    pub fn new(skills: f64, experience: f64, education: f64, text_similarity: f64) -> Result<Self> {
        let weights = Self {
            skills,
            experience,
            education,
            text_similarity,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.text_similarity
    }

    /// Rejects negative or non-finite weights and sums other than 1.0.
    /// Never renormalizes.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
            ("text_similarity", self.text_similarity),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::configuration(format!(
                    "weight '{name}' must be a finite non-negative number, got {value}"
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchError::configuration(format!(
                "match weights must sum to 1.0, got {sum:.6}"
            )));
        }
        Ok(())
    }

    /// Weighted sum of the clamped sub-scores, itself clamped to [0, 100].
    pub fn composite(&self, scores: &SubScores) -> f64 {
        let s = scores.clamped();
        (self.skills * s.skills
            + self.experience * s.experience
            + self.education * s.education
            + self.text_similarity * s.text_similarity)
            .clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = MatchWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-9);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_composite_full() {
        let w = MatchWeights::default();
        let score = w.composite(&SubScores::new(100.0, 100.0, 100.0, 100.0));
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_composite_partial() {
        let w = MatchWeights::default();
        // 0.4*80 + 0.3*60 + 0.2*100 + 0.1*20 = 32 + 18 + 20 + 2 = 72
        let score = w.composite(&SubScores::new(80.0, 60.0, 100.0, 20.0));
        assert!((score - 72.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_override_example() {
        let w = MatchWeights::new(0.5, 0.5, 0.0, 0.0).unwrap();
        let score = w.composite(&SubScores::new(80.0, 60.0, 0.0, 0.0));
        assert!((score - 70.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_sub_scores_clamped_before_weighting() {
        let w = MatchWeights::new(1.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(w.composite(&SubScores::new(150.0, 0.0, 0.0, 0.0)), 100.0);
        assert_eq!(w.composite(&SubScores::new(-20.0, 0.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_bad_sum_is_configuration_error() {
        let err = MatchWeights::new(0.5, 0.5, 0.5, 0.0).unwrap_err();
        assert!(matches!(err, MatchError::Configuration(_)));
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_negative_or_nan_rejected() {
        assert!(MatchWeights::new(1.2, -0.2, 0.0, 0.0).is_err());
        assert!(MatchWeights::new(f64::NAN, 0.5, 0.5, 0.0).is_err());
    }
}
