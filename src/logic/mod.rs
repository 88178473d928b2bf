//! Logic Module - Reconciliation Engines
//!
//! Data flow: driver -> (frame, timestamp) -> model::interpret ->
//! FrameVerdict -> tracker::BowlReconciler -> BowlState ->
//! tracker::ledger::merge -> cumulative ledger.
//!
//! - `model/` - threshold policy and frame interpretation (pure)
//! - `tracker/` - bowl state machine, ledger, legacy consistency gate
//! - `engine` - the owning object behind the command/query surface
//! - `driver` - cadence, start/stop, classifier boundary

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod model;
pub mod tracker;
