//! Engine Configuration
//!
//! Strongly-typed configuration validated once, at construction time.
//! Labels and their ordering are fixed for the engine's lifetime - the
//! classifier's output vector must line up with them.

use serde::{Deserialize, Serialize};

use crate::constants::EXPIRY_WINDOW_MS;
use crate::logic::error::EngineError;
use crate::logic::model::Sensitivity;
use crate::logic::tracker::{FallbackBehavior, TrackingMode};

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ordered label set, one entry per classifier output index
    pub labels: Vec<String>,
    pub sensitivity: Sensitivity,
    pub tracking_mode: TrackingMode,
    /// Persistence window (ms); override permitted for testing
    pub expiry_window_ms: u64,
    /// Legacy consistency-gate fallback behavior
    pub fallback: FallbackBehavior,
}

impl EngineConfig {
    /// Defaults: Medium sensitivity, Persistent tracking, 8s expiry,
    /// no-change fallback. Labels are normalized to lowercase.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|l| l.as_ref().to_lowercase())
                .collect(),
            sensitivity: Sensitivity::default(),
            tracking_mode: TrackingMode::default(),
            expiry_window_ms: EXPIRY_WINDOW_MS,
            fallback: FallbackBehavior::default(),
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_tracking_mode(mut self, mode: TrackingMode) -> Self {
        self.tracking_mode = mode;
        self
    }

    pub fn with_expiry_window_ms(mut self, window_ms: u64) -> Self {
        self.expiry_window_ms = window_ms;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackBehavior) -> Self {
        self.fallback = fallback;
        self
    }

    /// Configuration-time validation. Runtime ticks assume this passed.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.labels.is_empty() {
            return Err(EngineError::EmptyLabelSet);
        }
        for (i, label) in self.labels.iter().enumerate() {
            if self.labels[..i].contains(label) {
                return Err(EngineError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new(["Apple", "Banana"]);
        assert_eq!(config.labels, vec!["apple", "banana"]);
        assert_eq!(config.sensitivity, Sensitivity::Medium);
        assert_eq!(config.tracking_mode, TrackingMode::Persistent);
        assert_eq!(config.expiry_window_ms, EXPIRY_WINDOW_MS);
        assert_eq!(config.fallback, FallbackBehavior::NoChange);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = EngineConfig::new(["apple"])
            .with_sensitivity(Sensitivity::High)
            .with_tracking_mode(TrackingMode::DirectReplacement)
            .with_expiry_window_ms(2_000)
            .with_fallback(FallbackBehavior::LegacyRandom);
        assert_eq!(config.sensitivity, Sensitivity::High);
        assert_eq!(config.tracking_mode, TrackingMode::DirectReplacement);
        assert_eq!(config.expiry_window_ms, 2_000);
        assert_eq!(config.fallback, FallbackBehavior::LegacyRandom);
    }

    #[test]
    fn test_empty_label_set_is_rejected() {
        let config = EngineConfig::new(Vec::<String>::new());
        assert_eq!(config.validate(), Err(EngineError::EmptyLabelSet));
    }

    #[test]
    fn test_duplicate_labels_are_rejected() {
        // duplicates only after lowercase normalization still count
        let config = EngineConfig::new(["Apple", "apple"]);
        assert_eq!(
            config.validate(),
            Err(EngineError::DuplicateLabel {
                label: "apple".to_string()
            })
        );
    }
}
