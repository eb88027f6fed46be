//! ATS scoring: pluggable, trait-based scorer over `ResumeFeatureVector`.
//!
//! Default: `ProxyAtsScorer`, a linear model over the count features using the
//! coefficients the scoring model was trained to approximate. Deterministic, no artifact.
//!
//! `AppState` holds an `Arc<dyn AtsScorer>` inside the `Analyzer`.

use async_trait::async_trait;

use crate::analysis::features::ResumeFeatureVector;
use crate::ml::ModelError;

/// Raw model output at which the displayed ATS score reaches 100.
pub const DEFAULT_ATS_SCALE: f64 = 9.0;

#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score_features(&self, features: &ResumeFeatureVector) -> Result<f64, ModelError>;

    /// Short backend name for logs, e.g. "proxy".
    fn backend(&self) -> &'static str;
}

/// Linear scorer: `Σ coefficient × feature`, in `ResumeFeatureVector::as_array` order.
#[derive(Debug, Clone)]
pub struct ProxyAtsScorer {
    coefficients: [f64; 7],
}

impl Default for ProxyAtsScorer {
    fn default() -> Self {
        Self {
            // skills, education, colleges, companies, experience, projects, text chars
            coefficients: [0.35, 0.15, 0.10, 0.15, 0.10, 0.10, 0.005 / 1000.0],
        }
    }
}

#[async_trait]
impl AtsScorer for ProxyAtsScorer {
    async fn score_features(&self, features: &ResumeFeatureVector) -> Result<f64, ModelError> {
        let raw: f64 = features
            .as_array()
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, c)| x * c)
            .sum();

        if raw.is_finite() {
            Ok(raw)
        } else {
            Err(ModelError::NonFinite)
        }
    }

    fn backend(&self) -> &'static str {
        "proxy"
    }
}

/// Rescales raw scorer output to a 0–100 display score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtsScale {
    max_raw: f64,
}

impl AtsScale {
    /// `max_raw` must be positive; non-positive values fall back to the default.
    pub fn new(max_raw: f64) -> Self {
        if max_raw > 0.0 && max_raw.is_finite() {
            Self { max_raw }
        } else {
            Self {
                max_raw: DEFAULT_ATS_SCALE,
            }
        }
    }

    pub fn rescale(&self, raw: f64) -> f64 {
        let pct = (raw * 100.0 / self.max_raw).clamp(0.0, 100.0);
        (pct * 100.0).round() / 100.0
    }
}

impl Default for AtsScale {
    fn default() -> Self {
        Self::new(DEFAULT_ATS_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_proxy_scorer_empty_features_is_zero() {
        let score = ProxyAtsScorer::default()
            .score_features(&ResumeFeatureVector::default())
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_proxy_scorer_linear_combination() {
        let features = ResumeFeatureVector {
            skill_count: 10,
            education_count: 2,
            college_count: 1,
            company_count: 2,
            experience_count: 3,
            project_count: 2,
            text_length: 2000,
        };
        // 3.5 + 0.3 + 0.1 + 0.3 + 0.3 + 0.2 + 0.01 = 4.71
        let score = ProxyAtsScorer::default()
            .score_features(&features)
            .await
            .unwrap();
        assert!((score - 4.71).abs() < 1e-9, "score was {score}");
    }

    #[tokio::test]
    async fn test_non_finite_score_rejected() {
        let scorer = ProxyAtsScorer {
            coefficients: [f64::INFINITY; 7],
        };
        let features = ResumeFeatureVector {
            skill_count: 1,
            ..Default::default()
        };
        assert!(matches!(
            scorer.score_features(&features).await,
            Err(ModelError::NonFinite)
        ));
    }

    #[test]
    fn test_rescale_default_scale() {
        let scale = AtsScale::default();
        assert_eq!(scale.rescale(4.5), 50.0);
        assert_eq!(scale.rescale(4.71), 52.33);
    }

    #[test]
    fn test_rescale_clamped() {
        let scale = AtsScale::new(9.0);
        assert_eq!(scale.rescale(20.0), 100.0);
        assert_eq!(scale.rescale(-1.0), 0.0);
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        assert_eq!(AtsScale::new(0.0), AtsScale::default());
        assert_eq!(AtsScale::new(f64::NAN), AtsScale::default());
    }
}
