//! Tracker Module - Bowl State & History
//!
//! - `types` - TrackedItem, BowlState, LedgerEntry, TrackingMode
//! - `reconciler` - the temporal state machine folding verdicts into state
//! - `ledger` - monotonic cumulative count merge
//! - `consistency` - legacy add/remove sliding window

pub mod consistency;
pub mod ledger;
pub mod reconciler;
pub mod types;

pub use consistency::{ChangeVerdict, ConsistencyGate, FallbackBehavior};
pub use reconciler::BowlReconciler;
pub use types::{BowlState, Ledger, LedgerEntry, TrackedItem, TrackingMode};
