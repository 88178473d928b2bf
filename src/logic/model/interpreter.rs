//! Frame Interpreter
//!
//! Converts one raw probability vector into a `FrameVerdict`.
//! Pure and stateless - no history is consulted here. All
//! history-sensitivity lives in the reconciler.

use serde::{Deserialize, Serialize};

use super::threshold::ThresholdPolicy;
use crate::logic::error::EngineError;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One label asserted present in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    /// Raw classifier probability for this label
    pub confidence: f32,
}

/// Interpreted outcome of a single classification frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameVerdict {
    /// Scene evidence too weak to assert anything, including "no item".
    /// Ambiguity favors stability over false additions.
    Empty { max_confidence: f32 },
    /// At least one label cleared the detection threshold
    Detected {
        items: Vec<Detection>,
        max_confidence: f32,
    },
}

impl FrameVerdict {
    pub fn is_empty(&self) -> bool {
        matches!(self, FrameVerdict::Empty { .. })
    }

    pub fn max_confidence(&self) -> f32 {
        match self {
            FrameVerdict::Empty { max_confidence } => *max_confidence,
            FrameVerdict::Detected { max_confidence, .. } => *max_confidence,
        }
    }
}

// ============================================================================
// INTERPRETATION
// ============================================================================

/// Interpret one probability vector against the configured label ordering.
///
/// A length mismatch is a configuration error and aborts the tick before
/// any state is touched - never silently truncated.
pub fn interpret(
    vector: &[f32],
    labels: &[String],
    policy: &ThresholdPolicy,
) -> Result<FrameVerdict, EngineError> {
    if vector.len() != labels.len() {
        return Err(EngineError::VectorLength {
            expected: labels.len(),
            actual: vector.len(),
        });
    }

    let max_confidence = vector.iter().cloned().fold(0.0f32, f32::max);

    // Scene appears empty - max confidence below the empty threshold
    if max_confidence < policy.empty_threshold {
        log::debug!(
            "Scene appears empty - max confidence {:.3} below {:.2}",
            max_confidence,
            policy.empty_threshold
        );
        return Ok(FrameVerdict::Empty { max_confidence });
    }

    let items: Vec<Detection> = vector
        .iter()
        .zip(labels.iter())
        .filter(|(prob, _)| **prob >= policy.detection_threshold)
        .map(|(prob, label)| Detection {
            label: label.clone(),
            confidence: *prob,
        })
        .collect();

    // Max landed between the empty and detection thresholds
    if items.is_empty() {
        log::debug!(
            "No label above detection threshold {:.2} (max {:.3})",
            policy.detection_threshold,
            max_confidence
        );
        return Ok(FrameVerdict::Empty { max_confidence });
    }

    for item in &items {
        log::debug!(
            "Detected {} with confidence {:.1}%",
            item.label,
            item.confidence * 100.0
        );
    }

    Ok(FrameVerdict::Detected {
        items,
        max_confidence,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::threshold::Sensitivity;

    fn labels() -> Vec<String> {
        vec!["apple".into(), "banana".into(), "orange".into()]
    }

    #[test]
    fn test_low_max_is_empty() {
        let policy = ThresholdPolicy::resolve(Sensitivity::Medium);
        let verdict = interpret(&[0.4, 0.1, 0.2], &labels(), &policy).unwrap();
        assert_eq!(verdict, FrameVerdict::Empty { max_confidence: 0.4 });
    }

    #[test]
    fn test_between_thresholds_is_empty() {
        // Max 0.6 clears the empty threshold (0.50) but not detection (0.75)
        let policy = ThresholdPolicy::resolve(Sensitivity::Medium);
        let verdict = interpret(&[0.6, 0.1, 0.1], &labels(), &policy).unwrap();
        assert!(verdict.is_empty());
        assert_eq!(verdict.max_confidence(), 0.6);
    }

    #[test]
    fn test_single_detection() {
        let policy = ThresholdPolicy::resolve(Sensitivity::Medium);
        let verdict = interpret(&[0.9, 0.1, 0.1], &labels(), &policy).unwrap();
        match verdict {
            FrameVerdict::Detected { items, max_confidence } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].label, "apple");
                assert_eq!(items[0].confidence, 0.9);
                assert_eq!(max_confidence, 0.9);
            }
            other => panic!("expected Detected, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_detections_keep_per_label_confidence() {
        let policy = ThresholdPolicy::resolve(Sensitivity::High);
        let verdict = interpret(&[0.65, 0.9, 0.3], &labels(), &policy).unwrap();
        match verdict {
            FrameVerdict::Detected { items, .. } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].label, "apple");
                assert_eq!(items[0].confidence, 0.65);
                assert_eq!(items[1].label, "banana");
                assert_eq!(items[1].confidence, 0.9);
            }
            other => panic!("expected Detected, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_detection_threshold_is_included() {
        let policy = ThresholdPolicy::resolve(Sensitivity::Medium);
        let verdict = interpret(&[0.75, 0.0, 0.0], &labels(), &policy).unwrap();
        assert!(!verdict.is_empty());
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let policy = ThresholdPolicy::default();
        let err = interpret(&[0.9, 0.1], &labels(), &policy).unwrap_err();
        assert_eq!(
            err,
            EngineError::VectorLength {
                expected: 3,
                actual: 2
            }
        );
    }
}
