//! Ledger Merger
//!
//! Derives the cumulative per-label counts from bowl state transitions.
//! The ledger is a monotonic ratchet: it records the highest count ever
//! confidently observed, so momentary under-detection never loses
//! previously confirmed items. Only the explicit manual paths below may
//! lower it.

use crate::logic::tracker::types::{BowlState, Ledger, LedgerEntry};

// ============================================================================
// MERGE RULE
// ============================================================================

/// Raise each ledger entry to its bowl count when the bowl shows more.
/// Never lowers anything.
pub fn merge(bowl: &BowlState, ledger: &mut Ledger) {
    for (label, item) in bowl {
        if let Some(entry) = ledger.get_mut(label) {
            if item.count > entry.cumulative_count {
                entry.cumulative_count = item.count;
                log::info!(
                    "Ledger updated: {} count increased to {}",
                    label,
                    item.count
                );
            }
        }
    }
}

// ============================================================================
// MANUAL PATHS
// ============================================================================

/// Saturating decrement for the false-positive removal path.
pub fn decrement(ledger: &mut Ledger, label: &str) {
    if let Some(entry) = ledger.get_mut(label) {
        if entry.cumulative_count > 0 {
            entry.cumulative_count -= 1;
            log::info!(
                "Ledger decreased: {} count now {}",
                label,
                entry.cumulative_count
            );
        }
    }
}

/// Manual count adjustment, clamped at zero. Unknown label is a no-op.
pub fn adjust(ledger: &mut Ledger, label: &str, delta: i32) {
    if let Some(entry) = ledger.get_mut(label) {
        let new_count = (entry.cumulative_count as i64 + delta as i64).max(0) as u32;
        entry.cumulative_count = new_count;
        log::info!("Ledger adjusted: {} count set to {}", label, new_count);
    }
}

/// Update the restock threshold for one label.
pub fn set_restock_threshold(ledger: &mut Ledger, label: &str, value: u32) {
    if let Some(entry) = ledger.get_mut(label) {
        entry.restock_threshold = value;
    }
}

/// Zero every count. Entries themselves are never deleted.
pub fn reset_counts(ledger: &mut Ledger) {
    for entry in ledger.values_mut() {
        entry.cumulative_count = 0;
    }
    log::info!("All ledger counts reset to 0");
}

/// Build a ledger covering the configured label set, all counts at zero.
pub fn initialize(labels: &[String]) -> Ledger {
    labels
        .iter()
        .map(|label| (label.clone(), LedgerEntry::new(label.clone())))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
