//! Smart Bowl/Tray - Bowl State Reconciliation Core
//!
//! Ingests a periodic stream of per-frame classification vectors and
//! reconciles them into a stable view of what is currently in the bowl,
//! plus a monotonic cumulative ledger per item type. Camera capture, the
//! classifier model, and UI all live upstream of this crate; the engine
//! only ever sees already-materialized probability vectors.

pub mod constants;
pub mod logic;

pub use logic::config::EngineConfig;
pub use logic::driver::{FrameClassifier, TrackingLoop};
pub use logic::engine::{BowlEngine, EngineStatus};
pub use logic::error::EngineError;
pub use logic::model::{FrameVerdict, Sensitivity, ThresholdPolicy};
pub use logic::tracker::{BowlState, ChangeVerdict, FallbackBehavior, Ledger, TrackingMode};
