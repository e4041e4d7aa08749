//! Search limits and a stoppable search clock.
//!
//! A search is bounded by depth only. A caller that wants to interrupt it
//! shares a [`TimeControl`]; engines poll it between root moves only, so a
//! stopped search still returns the best move among the root moves it
//! finished.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 3;

#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Search depth in plies. Zero means "do not search".
    pub depth: u8,
    /// Stop flag shared with whoever may interrupt the search.
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self::with_control(depth, TimeControl::new())
    }

    /// Limits whose search stops once `time_control` is stopped, including a
    /// stop issued before the search begins.
    pub fn with_control(depth: u8, time_control: TimeControl) -> Self {
        Self {
            depth,
            time_control,
        }
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(DEFAULT_DEPTH)
    }
}

/// Cloneable handle to a shared stop flag and the time the search started.
#[derive(Debug, Clone, Default)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started_at: Arc<Mutex<Option<Instant>>>,
}

impl TimeControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock. A stop already requested stays in effect.
    pub fn start(&self) {
        *self.started_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    /// Interrupt the search at the next root move.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// True if both handles share one stop flag.
    pub fn same_flag(&self, other: &TimeControl) -> bool {
        Arc::ptr_eq(&self.stopped, &other.stopped)
    }

    /// Time since [`TimeControl::start`], or zero if never started.
    pub fn elapsed(&self) -> Duration {
        let started_at = *self.started_at.lock().unwrap_or_else(|e| e.into_inner());
        started_at.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
