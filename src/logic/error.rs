//! Engine Errors
//!
//! Every error here is a configuration or caller mistake, surfaced before
//! any state is touched. Nothing in the engine is retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Probability vector does not line up with the configured label set.
    /// The tick is aborted; bowl state and ledger stay untouched.
    #[error("probability vector has {actual} entries, label set has {expected}")]
    VectorLength { expected: usize, actual: usize },

    /// Custom threshold pair violates `empty <= detection`
    #[error("empty threshold {empty} exceeds detection threshold {detection}")]
    ThresholdOrder { empty: f32, detection: f32 },

    /// Threshold outside [0, 1]
    #[error("threshold {value} is outside [0.0, 1.0]")]
    ThresholdRange { value: f32 },

    /// Engine configured with no labels
    #[error("label set is empty")]
    EmptyLabelSet,

    /// Same label configured twice (after lowercase normalization)
    #[error("duplicate label: {label}")]
    DuplicateLabel { label: String },
}
