//! Core types for taglens

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of labels kept in a classification result
pub const TOP_LABELS: usize = 5;

/// One label/confidence pair as produced by the remote model, before
/// normalization. The confidence may be a probability in [0, 1] or already a
/// percentage, depending on the serving stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScore {
    /// Subject label text
    pub label: String,

    /// Model-assigned score, probability or percentage
    pub confidence: f32,
}

/// Raw response body from the remote model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrediction {
    /// All scored labels, in whatever order the model emitted them
    #[serde(default)]
    pub confidences: Vec<RawScore>,
}

/// A single label with its confidence as a percentage in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Subject label text
    pub label: String,

    /// Confidence percentage
    pub confidence: f32,
}

/// Normalized classification result: at most [`TOP_LABELS`] labels, sorted by
/// descending confidence, percentages scaled exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Top labels, best first
    pub labels: Vec<LabelScore>,
}

impl ClassificationResult {
    /// Normalize a raw model response.
    ///
    /// Confidences arriving as probabilities (every value ≤ 1.0) are scaled
    /// to percentages; values already in percent are passed through
    /// unchanged. Scaling happens exactly once. The labels are then sorted by
    /// descending confidence and truncated to the top [`TOP_LABELS`].
    ///
    /// Returns [`Error::MalformedResponse`] when the response carries no
    /// confidences, or any confidence is non-finite, negative, or above 100
    /// percent.
    pub fn from_raw(raw: RawPrediction) -> Result<Self> {
        if raw.confidences.is_empty() {
            return Err(Error::malformed("response carried no confidences"));
        }

        let mut max = f32::NEG_INFINITY;
        for score in &raw.confidences {
            if !score.confidence.is_finite() || score.confidence < 0.0 {
                return Err(Error::malformed(format!(
                    "confidence {} for label {:?} is out of range",
                    score.confidence, score.label
                )));
            }
            max = max.max(score.confidence);
        }
        if max > 100.0 {
            return Err(Error::malformed(format!(
                "confidence {} exceeds 100 percent",
                max
            )));
        }

        // Probabilities scale to percent exactly once; percentages pass
        // through untouched.
        let scale = if max <= 1.0 { 100.0 } else { 1.0 };

        let mut labels: Vec<LabelScore> = raw
            .confidences
            .into_iter()
            .map(|score| LabelScore {
                label: score.label,
                confidence: score.confidence * scale,
            })
            .collect();

        labels.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        labels.truncate(TOP_LABELS);

        Ok(Self { labels })
    }

    /// Best label, if any
    pub fn top(&self) -> Option<&LabelScore> {
        self.labels.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, f32)]) -> RawPrediction {
        RawPrediction {
            confidences: pairs
                .iter()
                .map(|(label, confidence)| RawScore {
                    label: label.to_string(),
                    confidence: *confidence,
                })
                .collect(),
        }
    }

    #[test]
    fn test_probabilities_scale_to_percent() {
        let result = ClassificationResult::from_raw(raw(&[
            ("A", 0.92),
            ("B", 0.61),
            ("C", 0.40),
            ("D", 0.18),
            ("E", 0.05),
            ("F", 0.01),
        ]))
        .unwrap();

        let labels: Vec<(&str, f32)> = result
            .labels
            .iter()
            .map(|l| (l.label.as_str(), l.confidence))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("A", 92.0),
                ("B", 61.0),
                ("C", 40.0),
                ("D", 18.0),
                ("E", 5.0)
            ]
        );
    }

    #[test]
    fn test_percentages_pass_through_unscaled() {
        let result =
            ClassificationResult::from_raw(raw(&[("A", 92.0), ("B", 61.0)])).unwrap();

        assert_eq!(result.labels[0].confidence, 92.0);
        assert_eq!(result.labels[1].confidence, 61.0);
    }

    #[test]
    fn test_sorts_descending_and_truncates() {
        let result = ClassificationResult::from_raw(raw(&[
            ("low", 0.1),
            ("high", 0.9),
            ("mid", 0.5),
            ("d", 0.4),
            ("e", 0.3),
            ("f", 0.2),
            ("g", 0.15),
        ]))
        .unwrap();

        assert_eq!(result.labels.len(), TOP_LABELS);
        assert_eq!(result.top().unwrap().label, "high");
        for pair in result.labels.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_empty_confidences_rejected() {
        let err = ClassificationResult::from_raw(raw(&[])).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_nan_confidence_rejected() {
        let err = ClassificationResult::from_raw(raw(&[("A", f32::NAN)])).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_negative_confidence_rejected() {
        let err = ClassificationResult::from_raw(raw(&[("A", -0.2)])).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_over_100_percent_rejected() {
        let err = ClassificationResult::from_raw(raw(&[("A", 240.0)])).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_raw_prediction_deserializes_missing_confidences() {
        let raw: RawPrediction = serde_json::from_str(r#"{"label": "cs.LG"}"#).unwrap();
        assert!(raw.confidences.is_empty());
    }
}
