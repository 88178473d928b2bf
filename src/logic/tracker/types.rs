//! Tracker Types
//!
//! Core data structures for bowl tracking. No logic - only data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::DEFAULT_RESTOCK_THRESHOLD;

// ============================================================================
// TRACKING MODE
// ============================================================================

/// How absence of detection affects tracked state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingMode {
    /// What's seen now is all that exists - every tick replaces the bowl
    DirectReplacement,
    /// Items persist through missed frames until the expiry window lapses
    Persistent,
}

impl Default for TrackingMode {
    fn default() -> Self {
        TrackingMode::Persistent
    }
}

impl TrackingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingMode::DirectReplacement => "direct-replacement",
            TrackingMode::Persistent => "persistent",
        }
    }
}

impl std::fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TRACKED ITEM / BOWL STATE
// ============================================================================

/// One item type currently believed present in the bowl.
///
/// Owned exclusively by the reconciler; external callers only ever see
/// cloned snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem {
    pub label: String,
    /// Instances of this label in the bowl. Always >= 1 - entries that
    /// would reach 0 are removed instead. A single classification vector
    /// cannot count instances, so this is 1 today; the field is the seam
    /// for a future multi-instance upstream model.
    pub count: u32,
    /// Timestamp (ms) of the last positive detection
    pub last_seen_ms: u64,
    /// Classifier confidence at that detection
    pub confidence: f32,
}

/// Label -> TrackedItem. Absent label means count 0.
///
/// BTreeMap keeps iteration and serialization order deterministic.
pub type BowlState = BTreeMap<String, TrackedItem>;

// ============================================================================
// LEDGER
// ============================================================================

/// Cumulative historical count for one label.
///
/// `cumulative_count` is the highest count ever confidently observed -
/// non-decreasing except through explicit manual adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub label: String,
    pub cumulative_count: u32,
    /// Below this, the label lands on the restock list
    pub restock_threshold: u32,
}

impl LedgerEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cumulative_count: 0,
            restock_threshold: DEFAULT_RESTOCK_THRESHOLD,
        }
    }
}

/// Label -> LedgerEntry. Entries are created when a label is configured
/// and never deleted during the engine's lifetime.
pub type Ledger = BTreeMap<String, LedgerEntry>;

// ============================================================================
// TESTS
// ============================================================================
