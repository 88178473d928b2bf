//! Consistency Gate - Legacy Add/Remove Heuristic
//!
//! Bounded sliding window over the most recent single-label detections,
//! used only by the simplified "added vs. removed" mode kept for parity
//! with existing consumers. Full bowl tracking does not consult this.
//!
//! The original fallback decided inventory mutation with an unseeded coin
//! flip. That behavior is preserved behind `FallbackBehavior::LegacyRandom`
//! for compatibility; the default treats insufficient evidence as no state
//! change.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONSISTENCY_LOOKBACK_MS, CONSISTENCY_MIN_MATCHES, CONSISTENCY_WINDOW,
    LEGACY_ADD_PROBABILITY,
};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// What to do when the window holds too little evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackBehavior {
    /// Coin flip with P(Added) = 0.7, parity with the original heuristic
    LegacyRandom,
    /// Insufficient evidence leaves state alone (safer default)
    NoChange,
}

impl Default for FallbackBehavior {
    fn default() -> Self {
        FallbackBehavior::NoChange
    }
}

/// Outcome of the simplified classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeVerdict {
    Added,
    Removed,
    NoChange,
}

#[derive(Debug, Clone)]
struct RecordedDetection {
    label: String,
    timestamp_ms: u64,
}

// ============================================================================
// GATE
// ============================================================================

#[derive(Debug)]
pub struct ConsistencyGate {
    window: Vec<RecordedDetection>,
    fallback: FallbackBehavior,
    rng: StdRng,
}

impl ConsistencyGate {
    pub fn new(fallback: FallbackBehavior) -> Self {
        Self {
            window: Vec::with_capacity(CONSISTENCY_WINDOW),
            fallback,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor so the legacy random path is deterministic
    /// under test.
    pub fn with_seed(fallback: FallbackBehavior, seed: u64) -> Self {
        Self {
            window: Vec::with_capacity(CONSISTENCY_WINDOW),
            fallback,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Record one accepted detection. The caller filters by confidence;
    /// only detections above the empty threshold belong here.
    pub fn record(&mut self, label: &str, timestamp_ms: u64) {
        self.window.push(RecordedDetection {
            label: label.to_string(),
            timestamp_ms,
        });
        if self.window.len() > CONSISTENCY_WINDOW {
            self.window.remove(0);
        }
    }

    /// Classify a fresh detection of `label` as added or removed.
    pub fn classify(&mut self, label: &str, now_ms: u64) -> ChangeVerdict {
        let recent_same = self
            .window
            .iter()
            .filter(|d| {
                d.label == label
                    && now_ms.saturating_sub(d.timestamp_ms) < CONSISTENCY_LOOKBACK_MS
            })
            .count();

        if recent_same >= CONSISTENCY_MIN_MATCHES {
            return ChangeVerdict::Added;
        }

        match self.fallback {
            FallbackBehavior::LegacyRandom => {
                if self.rng.gen::<f64>() < LEGACY_ADD_PROBABILITY {
                    ChangeVerdict::Added
                } else {
                    ChangeVerdict::Removed
                }
            }
            FallbackBehavior::NoChange => ChangeVerdict::NoChange,
        }
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

impl Default for ConsistencyGate {
    fn default() -> Self {
        Self::new(FallbackBehavior::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_detections_are_added() {
        let mut gate = ConsistencyGate::new(FallbackBehavior::NoChange);
        gate.record("apple", 1_000);
        gate.record("apple", 2_000);
        assert_eq!(gate.classify("apple", 3_000), ChangeVerdict::Added);
    }

    #[test]
    fn test_insufficient_evidence_defaults_to_no_change() {
        let mut gate = ConsistencyGate::new(FallbackBehavior::NoChange);
        gate.record("apple", 1_000);
        assert_eq!(gate.classify("apple", 2_000), ChangeVerdict::NoChange);
    }

    #[test]
    fn test_stale_detections_fall_out_of_lookback() {
        let mut gate = ConsistencyGate::new(FallbackBehavior::NoChange);
        gate.record("apple", 0);
        gate.record("apple", 1_000);
        // 11s later both records are outside the 10s lookback
        assert_eq!(gate.classify("apple", 12_000), ChangeVerdict::NoChange);
    }

    #[test]
    fn test_window_is_bounded_to_three() {
        let mut gate = ConsistencyGate::new(FallbackBehavior::NoChange);
        gate.record("apple", 1_000);
        gate.record("banana", 2_000);
        gate.record("orange", 3_000);
        gate.record("kiwi", 4_000);
        // the apple record was pushed out, so only one banana match exists
        assert_eq!(gate.classify("banana", 5_000), ChangeVerdict::NoChange);
    }

    #[test]
    fn test_other_labels_do_not_count() {
        let mut gate = ConsistencyGate::new(FallbackBehavior::NoChange);
        gate.record("banana", 1_000);
        gate.record("banana", 2_000);
        assert_eq!(gate.classify("apple", 3_000), ChangeVerdict::NoChange);
    }

    #[test]
    fn test_legacy_fallback_is_deterministic_under_seed() {
        let mut a = ConsistencyGate::with_seed(FallbackBehavior::LegacyRandom, 42);
        let mut b = ConsistencyGate::with_seed(FallbackBehavior::LegacyRandom, 42);
        for t in 0..50u64 {
            assert_eq!(a.classify("apple", t), b.classify("apple", t));
        }
    }

    #[test]
    fn test_legacy_fallback_never_answers_no_change() {
        let mut gate = ConsistencyGate::with_seed(FallbackBehavior::LegacyRandom, 7);
        for t in 0..100u64 {
            let verdict = gate.classify("apple", t);
            assert_ne!(verdict, ChangeVerdict::NoChange);
        }
    }

    #[test]
    fn test_legacy_fallback_favors_added() {
        let mut gate = ConsistencyGate::with_seed(FallbackBehavior::LegacyRandom, 1234);
        let added = (0..1_000u64)
            .filter(|t| gate.classify("apple", *t) == ChangeVerdict::Added)
            .count();
        // P(Added) = 0.7; with 1000 samples this band is comfortably wide
        assert!(added > 600 && added < 800, "added = {}", added);
    }

    #[test]
    fn test_clear_empties_the_window() {
        let mut gate = ConsistencyGate::new(FallbackBehavior::NoChange);
        gate.record("apple", 1_000);
        gate.record("apple", 2_000);
        gate.clear();
        assert_eq!(gate.classify("apple", 3_000), ChangeVerdict::NoChange);
    }
}
