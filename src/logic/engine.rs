//! Bowl Engine
//!
//! The engine object owning bowl state, ledger, and the legacy consistency
//! gate behind the command/query surface. No global state, no clock: each
//! tick receives the caller's timestamp, one tick in flight at a time (the
//! driver guarantees non-overlapping calls).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::config::EngineConfig;
use crate::logic::error::EngineError;
use crate::logic::model::{interpret, FrameVerdict, Sensitivity, ThresholdPolicy};
use crate::logic::tracker::{
    ledger, BowlReconciler, BowlState, ChangeVerdict, ConsistencyGate, Ledger, TrackingMode,
};

// ============================================================================
// ENGINE STATUS
// ============================================================================

/// Snapshot of engine health for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub tick_count: u64,
    pub tracked_items: usize,
    pub tracking_mode: TrackingMode,
    pub sensitivity: Sensitivity,
    pub started_at: DateTime<Utc>,
    pub last_tick_ms: Option<u64>,
}

// ============================================================================
// BOWL ENGINE
// ============================================================================

pub struct BowlEngine {
    config: EngineConfig,
    policy: ThresholdPolicy,
    reconciler: BowlReconciler,
    ledger: Ledger,
    gate: ConsistencyGate,
    tick_count: u64,
    last_tick_ms: Option<u64>,
    started_at: DateTime<Utc>,
}

impl BowlEngine {
    /// Build an engine from validated configuration. The ledger gets one
    /// zero-count entry per configured label, never deleted afterwards.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let policy = ThresholdPolicy::resolve(config.sensitivity);
        let reconciler = BowlReconciler::new(config.tracking_mode, config.expiry_window_ms);
        let ledger = ledger::initialize(&config.labels);
        let gate = ConsistencyGate::new(config.fallback);

        log::info!(
            "Bowl engine initialized: {} labels, {} mode, {} sensitivity",
            config.labels.len(),
            config.tracking_mode,
            config.sensitivity
        );

        Ok(Self {
            config,
            policy,
            reconciler,
            ledger,
            gate,
            tick_count: 0,
            last_tick_ms: None,
            started_at: Utc::now(),
        })
    }

    /// Engine with a seeded consistency gate, for deterministic tests of
    /// the legacy random fallback.
    pub fn with_gate_seed(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        let fallback = config.fallback;
        let mut engine = Self::new(config)?;
        engine.gate = ConsistencyGate::with_seed(fallback, seed);
        Ok(engine)
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Fold one classification frame into the tracked state.
    ///
    /// On error (vector/label mismatch) nothing is applied - bowl state
    /// and ledger are exactly as before the call.
    pub fn tick(&mut self, vector: &[f32], now_ms: u64) -> Result<FrameVerdict, EngineError> {
        let verdict = interpret(vector, &self.config.labels, &self.policy)?;

        self.reconciler.apply(&verdict, now_ms);
        ledger::merge(self.reconciler.state(), &mut self.ledger);

        self.tick_count += 1;
        self.last_tick_ms = Some(now_ms);

        Ok(verdict)
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Clear the bowl. The ledger is untouched.
    pub fn reset_bowl(&mut self) {
        self.reconciler.clear();
    }

    /// Evict a misdetected label from the bowl and take one back off its
    /// cumulative count, in one step. Unknown label is a no-op.
    pub fn remove_false_positive(&mut self, label: &str) {
        let label = label.to_lowercase();
        self.reconciler.remove(&label);
        ledger::decrement(&mut self.ledger, &label);
    }

    pub fn set_tracking_mode(&mut self, mode: TrackingMode) {
        if mode != self.config.tracking_mode {
            log::info!("Tracking mode changed to {}", mode);
        }
        self.config.tracking_mode = mode;
        self.reconciler.set_mode(mode);
    }

    pub fn set_sensitivity(&mut self, sensitivity: Sensitivity) {
        if sensitivity != self.config.sensitivity {
            log::info!("Detection sensitivity changed to {}", sensitivity);
        }
        self.config.sensitivity = sensitivity;
        self.policy = ThresholdPolicy::resolve(sensitivity);
    }

    /// Manual ledger adjustment (maintenance/developer path), clamped at 0.
    pub fn adjust_ledger(&mut self, label: &str, delta: i32) {
        ledger::adjust(&mut self.ledger, &label.to_lowercase(), delta);
    }

    pub fn set_restock_threshold(&mut self, label: &str, value: u32) {
        ledger::set_restock_threshold(&mut self.ledger, &label.to_lowercase(), value);
    }

    /// Zero all cumulative counts and clear the bowl.
    pub fn reset_ledger_counts(&mut self) {
        ledger::reset_counts(&mut self.ledger);
        self.reconciler.clear();
    }

    // ------------------------------------------------------------------
    // Legacy add/remove path
    // ------------------------------------------------------------------

    /// Simplified heuristic classification of a single-label detection.
    /// Detections above the empty threshold enter the consistency window
    /// after classification.
    pub fn classify_change(&mut self, label: &str, confidence: f32, now_ms: u64) -> ChangeVerdict {
        let label = label.to_lowercase();
        let verdict = self.gate.classify(&label, now_ms);
        if confidence > self.policy.empty_threshold {
            self.gate.record(&label, now_ms);
        }
        verdict
    }

    /// Apply a legacy change verdict to the ledger.
    pub fn apply_change(&mut self, label: &str, verdict: ChangeVerdict) {
        let label = label.to_lowercase();
        match verdict {
            ChangeVerdict::Added => ledger::adjust(&mut self.ledger, &label, 1),
            ChangeVerdict::Removed => ledger::decrement(&mut self.ledger, &label),
            ChangeVerdict::NoChange => {}
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Snapshot of current bowl contents. Cloned - callers cannot alias
    /// internal state.
    pub fn bowl_state(&self) -> BowlState {
        self.reconciler.state().clone()
    }

    /// Snapshot of the cumulative ledger.
    pub fn ledger(&self) -> Ledger {
        self.ledger.clone()
    }

    /// Labels whose cumulative count fell below their restock threshold.
    pub fn restock_list(&self) -> Vec<String> {
        self.ledger
            .values()
            .filter(|e| e.cumulative_count < e.restock_threshold)
            .map(|e| e.label.clone())
            .collect()
    }

    pub fn labels(&self) -> &[String] {
        &self.config.labels
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            tick_count: self.tick_count,
            tracked_items: self.reconciler.state().len(),
            tracking_mode: self.config.tracking_mode,
            sensitivity: self.config.sensitivity,
            started_at: self.started_at,
            last_tick_ms: self.last_tick_ms,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
