//! Central Configuration Constants
//!
//! Single source of truth for calibration defaults.
//! The sensitivity threshold table itself lives in `logic::model::threshold`.

/// How long a tracked item survives without re-detection (Persistent mode).
///
/// Longer than the detection cadence (1-4s) so a single missed frame
/// never causes spurious eviction.
pub const EXPIRY_WINDOW_MS: u64 = 8_000;

/// Default driver cadence (milliseconds between ticks)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Consistency gate: number of recent detections kept
pub const CONSISTENCY_WINDOW: usize = 3;

/// Consistency gate: lookback horizon for "recent"
pub const CONSISTENCY_LOOKBACK_MS: u64 = 10_000;

/// Consistency gate: matches required to call a detection consistent
pub const CONSISTENCY_MIN_MATCHES: usize = 2;

/// Legacy fallback: probability the coin flip answers "added"
/// (parity with the original `Math.random() > 0.3`)
pub const LEGACY_ADD_PROBABILITY: f64 = 0.7;

/// Default restock threshold for new ledger entries
pub const DEFAULT_RESTOCK_THRESHOLD: u32 = 2;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Smart Bowl/Tray Core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get driver tick interval from environment or use default
pub fn get_tick_interval_ms() -> u64 {
    std::env::var("BOWL_TICK_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
}

/// Get expiry window from environment or use default
pub fn get_expiry_window_ms() -> u64 {
    std::env::var("BOWL_EXPIRY_WINDOW_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(EXPIRY_WINDOW_MS)
}
