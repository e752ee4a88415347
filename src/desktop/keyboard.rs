//! Global stop key handling
//!
//! A background rdev listener raises a shared flag when the stop key is pressed;
//! the automation loop polls it once per iteration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop flag shared between the key listener and the session loop
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a stop left over from a previous session
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Spawn the process-wide listener that raises `signal` on `q`
///
/// rdev's listener never returns while it works, so it lives on its own thread for
/// the lifetime of the process.
pub fn spawn_stop_listener(signal: StopSignal) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stop-key".to_string())
        .spawn(move || {
            let result = rdev::listen(move |event| {
                if let rdev::EventType::KeyPress(rdev::Key::KeyQ) = event.event_type {
                    log::debug!("Stop key pressed");
                    signal.raise();
                }
            });
            if let Err(e) = result {
                log::error!("Keyboard listener failed, 'q' will not stop the loop: {:?}", e);
            }
        })
}
