//! Smart Bowl/Tray Core - Main Entry Point
//!
//! Runs the reconciliation engine against a demo classifier that emits
//! random probability vectors, the same out-of-the-box experience the
//! original app ships when no trained model is available. A real
//! deployment replaces `DemoClassifier` with the actual model bridge.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::Duration;

use bowl_tracking_core::constants;
use bowl_tracking_core::{BowlEngine, EngineConfig, FrameClassifier, TrackingLoop};

/// Demo classifier: one uniform random probability per label.
struct DemoClassifier {
    label_count: usize,
    rng: StdRng,
}

impl FrameClassifier for DemoClassifier {
    fn classify(&mut self) -> Option<Vec<f32>> {
        Some((0..self.label_count).map(|_| self.rng.gen::<f32>()).collect())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let labels = [
        "apple", "banana", "orange", "mango", "kiwi", "pear", "peach", "plum", "guava",
    ];
    let config = EngineConfig::new(labels)
        .with_expiry_window_ms(constants::get_expiry_window_ms());

    let engine = match BowlEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Engine configuration rejected: {}", e);
            std::process::exit(1);
        }
    };

    let classifier = DemoClassifier {
        label_count: labels.len(),
        rng: StdRng::from_entropy(),
    };

    let interval_ms = constants::get_tick_interval_ms();
    let mut driver = TrackingLoop::new(engine);
    driver.start(classifier, interval_ms);
    log::info!("Demo classifier running at {}ms cadence", interval_ms);

    let shared = driver.engine();
    loop {
        thread::sleep(Duration::from_secs(5));

        let engine = shared.lock();
        let status = engine.status();
        log::info!(
            "tick #{} - {} item(s) tracked",
            status.tick_count,
            status.tracked_items
        );

        match serde_json::to_string(&engine.bowl_state()) {
            Ok(json) => log::info!("bowl: {}", json),
            Err(e) => log::warn!("snapshot serialization failed: {}", e),
        }

        let restock = engine.restock_list();
        if !restock.is_empty() {
            log::info!("restock suggestions: {}", restock.join(", "));
        }
    }
}
