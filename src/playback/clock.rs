//! The progress clock: a ticker thread that nudges the owning context
//! to refresh playback progress.
//!
//! The clock never touches playback state itself; it only sends ticks.
//! Ticks that arrive while the controller is Idle are ignored there.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub struct ProgressClock {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl ProgressClock {
    /// Start ticking at `interval`. The receiver is drained by the
    /// owning context, which calls the controller's `tick` in turn.
    pub fn start(interval: Duration) -> (Self, Receiver<Instant>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let join = thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }
                if tx.send(Instant::now()).is_err() {
                    break;
                }
            }
        });

        (
            Self {
                stop,
                join: Some(join),
            },
            rx,
        )
    }

    /// Stop the ticker thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressClock {
    fn drop(&mut self) {
        self.stop();
    }
}
