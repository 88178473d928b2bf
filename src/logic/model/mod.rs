//! Model Module - Frame-Level Interpretation
//!
//! - `threshold` - sensitivity -> threshold pair calibration
//! - `interpreter` - probability vector -> FrameVerdict
//!
//! Everything here is pure. The classifier producing the vectors lives
//! upstream and is only seen through the `FrameClassifier` trait in the
//! driver.

pub mod interpreter;
pub mod threshold;

pub use interpreter::{interpret, Detection, FrameVerdict};
pub use threshold::{Sensitivity, ThresholdPolicy};
