//! Tracking Loop - Scheduler/Driver
//!
//! Owns the detection cadence and feeds frames into the engine. The engine
//! itself is callback-free and synchronous; everything timer-shaped lives
//! here. Exactly one tick is in flight at a time - if the previous tick
//! still holds the engine, the cycle is skipped rather than queued.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::logic::engine::BowlEngine;

// ============================================================================
// CLASSIFIER BOUNDARY
// ============================================================================

/// Upstream classifier boundary. Capture and inference happen behind this
/// trait; the engine only ever sees the already-materialized vector.
pub trait FrameClassifier: Send {
    /// Produce the probability vector for the current frame, or `None`
    /// when no frame is available this cycle.
    fn classify(&mut self) -> Option<Vec<f32>>;
}

// ============================================================================
// TRACKING LOOP
// ============================================================================

pub struct TrackingLoop {
    engine: Arc<Mutex<BowlEngine>>,
    running: Arc<AtomicBool>,
    skipped_ticks: Arc<AtomicU64>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TrackingLoop {
    pub fn new(engine: BowlEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            running: Arc::new(AtomicBool::new(false)),
            skipped_ticks: Arc::new(AtomicU64::new(0)),
            handle: None,
        }
    }

    /// Shared handle for queries and manual commands while the loop runs.
    pub fn engine(&self) -> Arc<Mutex<BowlEngine>> {
        Arc::clone(&self.engine)
    }

    /// Cycles dropped because the previous tick was still in flight.
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Start polling the classifier at a fixed cadence.
    pub fn start<C>(&mut self, mut classifier: C, interval_ms: u64)
    where
        C: FrameClassifier + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            log::warn!("Tracking loop already running");
            return;
        }

        let engine = Arc::clone(&self.engine);
        let running = Arc::clone(&self.running);
        let skipped = Arc::clone(&self.skipped_ticks);

        self.handle = Some(thread::spawn(move || {
            log::info!("Tracking loop started ({}ms cadence)", interval_ms);
            while running.load(Ordering::Relaxed) {
                if let Some(vector) = classifier.classify() {
                    match engine.try_lock() {
                        Some(mut engine) => {
                            let now_ms = current_time_ms();
                            match engine.tick(&vector, now_ms) {
                                Ok(verdict) => {
                                    log::debug!(
                                        "Tick at {}: max confidence {:.1}%",
                                        now_ms,
                                        verdict.max_confidence() * 100.0
                                    );
                                }
                                Err(e) => log::warn!("Tick aborted: {}", e),
                            }
                        }
                        None => {
                            skipped.fetch_add(1, Ordering::Relaxed);
                            log::debug!("Previous tick still in flight - skipping cycle");
                        }
                    }
                }
                thread::sleep(Duration::from_millis(interval_ms));
            }
            log::info!("Tracking loop stopped");
        }));
    }

    /// Stop the loop and wait for the worker to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TrackingLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Current wall-clock time in milliseconds
pub fn current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// ============================================================================
// TESTS
// ============================================================================
