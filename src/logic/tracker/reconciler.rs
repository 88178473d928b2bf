//! Bowl Reconciler - Temporal State Machine
//!
//! Folds a sequence of frame verdicts plus manual commands into a stable
//! `BowlState`. Single frames are unreliable; this is where flicker gets
//! absorbed. The reconciler holds no clock of its own - every transition
//! receives the caller's timestamp.

use crate::logic::model::FrameVerdict;
use crate::logic::tracker::types::{BowlState, TrackedItem, TrackingMode};

// ============================================================================
// RECONCILER
// ============================================================================

#[derive(Debug, Clone)]
pub struct BowlReconciler {
    state: BowlState,
    mode: TrackingMode,
    expiry_window_ms: u64,
}

impl BowlReconciler {
    pub fn new(mode: TrackingMode, expiry_window_ms: u64) -> Self {
        Self {
            state: BowlState::new(),
            mode,
            expiry_window_ms,
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TrackingMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> &BowlState {
        &self.state
    }

    /// Apply one frame verdict at the given timestamp.
    pub fn apply(&mut self, verdict: &FrameVerdict, now_ms: u64) {
        // Stale items must not survive indefinitely even if the camera
        // stops producing Detected verdicts, so the sweep runs on every
        // tick regardless of the verdict.
        if self.mode == TrackingMode::Persistent {
            self.expire_stale(now_ms);
        }

        match (verdict, self.mode) {
            (FrameVerdict::Empty { .. }, TrackingMode::DirectReplacement) => {
                if !self.state.is_empty() {
                    log::info!("Clearing bowl - empty scene detected");
                }
                self.state.clear();
            }
            (FrameVerdict::Empty { .. }, TrackingMode::Persistent) => {
                // Absence of evidence is not evidence of absence within
                // the persistence window.
                log::debug!("Empty scene - maintaining persistent tracking");
            }
            (FrameVerdict::Detected { items, .. }, TrackingMode::DirectReplacement) => {
                self.state = items
                    .iter()
                    .map(|d| {
                        (
                            d.label.clone(),
                            TrackedItem {
                                label: d.label.clone(),
                                count: 1,
                                last_seen_ms: now_ms,
                                confidence: d.confidence,
                            },
                        )
                    })
                    .collect();
            }
            (FrameVerdict::Detected { items, .. }, TrackingMode::Persistent) => {
                for d in items {
                    let count = self.state.get(&d.label).map(|t| t.count).unwrap_or(1);
                    self.state.insert(
                        d.label.clone(),
                        TrackedItem {
                            label: d.label.clone(),
                            count,
                            last_seen_ms: now_ms,
                            confidence: d.confidence,
                        },
                    );
                }
            }
        }
    }

    /// Unconditional eviction, regardless of mode or timestamps.
    /// Idempotent - evicting an unknown label is a no-op.
    pub fn remove(&mut self, label: &str) -> bool {
        let removed = self.state.remove(label).is_some();
        if removed {
            log::info!("Manually removed {} from bowl", label);
        }
        removed
    }

    /// Evict everything.
    pub fn clear(&mut self) {
        self.state.clear();
        log::info!("Bowl contents reset");
    }

    /// Drop items not seen within the expiry window (strictly older).
    fn expire_stale(&mut self, now_ms: u64) {
        let window = self.expiry_window_ms;
        self.state.retain(|label, item| {
            let keep = now_ms.saturating_sub(item.last_seen_ms) <= window;
            if !keep {
                log::info!("Removing {} - not seen for {}s", label, window / 1000);
            }
            keep
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXPIRY_WINDOW_MS;
    use crate::logic::model::Detection;

    fn detected(pairs: &[(&str, f32)]) -> FrameVerdict {
        let items: Vec<Detection> = pairs
            .iter()
            .map(|(label, conf)| Detection {
                label: (*label).to_string(),
                confidence: *conf,
            })
            .collect();
        let max = pairs.iter().map(|(_, c)| *c).fold(0.0f32, f32::max);
        FrameVerdict::Detected {
            items,
            max_confidence: max,
        }
    }

    fn empty() -> FrameVerdict {
        FrameVerdict::Empty { max_confidence: 0.1 }
    }

    #[test]
    fn test_direct_replacement_is_exact() {
        let mut rec = BowlReconciler::new(TrackingMode::DirectReplacement, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("banana", 0.8)]), 1_000);
        rec.apply(&detected(&[("apple", 0.9)]), 2_000);

        assert_eq!(rec.state().len(), 1);
        let apple = &rec.state()["apple"];
        assert_eq!(apple.count, 1);
        assert_eq!(apple.confidence, 0.9);
        assert!(!rec.state().contains_key("banana"));
    }

    #[test]
    fn test_direct_replacement_clears_on_empty() {
        let mut rec = BowlReconciler::new(TrackingMode::DirectReplacement, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), 1_000);
        rec.apply(&empty(), 2_000);
        assert!(rec.state().is_empty());
    }

    #[test]
    fn test_persistent_keeps_items_through_empty_frames() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), 1_000);
        rec.apply(&empty(), 3_000);
        assert_eq!(rec.state().len(), 1);
        assert_eq!(rec.state()["apple"].last_seen_ms, 1_000);
    }

    #[test]
    fn test_persistent_leaves_undetected_labels_untouched() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), 1_000);
        rec.apply(&detected(&[("banana", 0.8)]), 2_000);

        assert_eq!(rec.state().len(), 2);
        assert_eq!(rec.state()["apple"].last_seen_ms, 1_000);
        assert_eq!(rec.state()["banana"].last_seen_ms, 2_000);
    }

    #[test]
    fn test_redetection_refreshes_last_seen_and_preserves_count() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), 1_000);
        rec.apply(&detected(&[("apple", 0.8)]), 5_000);

        let apple = &rec.state()["apple"];
        assert_eq!(apple.count, 1);
        assert_eq!(apple.last_seen_ms, 5_000);
        assert_eq!(apple.confidence, 0.8);
    }

    #[test]
    fn test_expiry_boundary() {
        let t0 = 10_000u64;
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), t0);

        rec.apply(&empty(), t0 + 7_999);
        assert!(rec.state().contains_key("apple"), "alive inside the window");

        rec.apply(&empty(), t0 + 8_001);
        assert!(!rec.state().contains_key("apple"), "expired past the window");
    }

    #[test]
    fn test_expiry_runs_on_detected_ticks_too() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), 0);
        // banana detection 9s later must not shield the stale apple
        rec.apply(&detected(&[("banana", 0.8)]), 9_000);

        assert!(!rec.state().contains_key("apple"));
        assert!(rec.state().contains_key("banana"));
    }

    #[test]
    fn test_manual_remove_is_idempotent() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9)]), 1_000);

        assert!(rec.remove("apple"));
        assert!(!rec.remove("apple"));
        assert!(!rec.remove("dragonfruit"));
        assert!(rec.state().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, EXPIRY_WINDOW_MS);
        rec.apply(&detected(&[("apple", 0.9), ("banana", 0.8)]), 1_000);
        rec.clear();
        assert!(rec.state().is_empty());
    }

    #[test]
    fn test_custom_expiry_window() {
        let mut rec = BowlReconciler::new(TrackingMode::Persistent, 500);
        rec.apply(&detected(&[("apple", 0.9)]), 0);
        rec.apply(&empty(), 501);
        assert!(rec.state().is_empty());
    }
}
