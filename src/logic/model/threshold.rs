//! Detection Threshold Policy
//!
//! Maps a sensitivity level to the `(detection, empty)` threshold pair used
//! by the frame interpreter. The table holds calibration constants - they
//! are not tunable per instance.

use serde::{Deserialize, Serialize};

use crate::logic::error::EngineError;

// ============================================================================
// SENSITIVITY
// ============================================================================

/// Detection sensitivity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sensitivity {
    /// Very high confidence required before anything is tracked
    Low,
    /// Balanced confidence
    Medium,
    /// Lower confidence acceptable
    High,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity::Medium
    }
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Low => "low",
            Sensitivity::Medium => "medium",
            Sensitivity::High => "high",
        }
    }
}

impl std::fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THRESHOLD POLICY
// ============================================================================

/// Threshold pair driving frame interpretation.
///
/// Invariant: `empty_threshold <= detection_threshold`. A frame whose max
/// probability falls below `empty_threshold` is an empty scene; a label is
/// only asserted present at or above `detection_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub detection_threshold: f32,
    pub empty_threshold: f32,
}

impl ThresholdPolicy {
    /// Resolve the fixed calibration table for a sensitivity level.
    ///
    /// Pure and total - every sensitivity has a valid pair.
    pub fn resolve(sensitivity: Sensitivity) -> Self {
        match sensitivity {
            Sensitivity::Low => Self {
                detection_threshold: 0.85,
                empty_threshold: 0.60,
            },
            Sensitivity::Medium => Self {
                detection_threshold: 0.75,
                empty_threshold: 0.50,
            },
            Sensitivity::High => Self {
                detection_threshold: 0.60,
                empty_threshold: 0.40,
            },
        }
    }

    /// Build a custom pair, validated at configuration time.
    pub fn custom(detection: f32, empty: f32) -> Result<Self, EngineError> {
        for value in [detection, empty] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::ThresholdRange { value });
            }
        }
        if empty > detection {
            return Err(EngineError::ThresholdOrder { empty, detection });
        }
        Ok(Self {
            detection_threshold: detection,
            empty_threshold: empty,
        })
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::resolve(Sensitivity::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
