//! # Progress: Atomic Sweep Counters
//!
//! Counters shared between the sieve loop and an optional background
//! reporter. The sieve bumps them once per window; the reporter thread reads
//! them every `interval` and logs a `tracing` event. Nothing here feeds back
//! into the sieve, so a run with or without a reporter emits the same primes.
//!
//! ## Background Reporter
//!
//! [`Progress::start_reporter`] spawns a thread that parks for `interval`,
//! then logs windows swept, primes emitted, the current window start, and the
//! emission rate. [`Progress::stop_reporter`] raises the shutdown flag, wakes
//! the thread and joins it, so shutdown never waits out a full interval.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

pub struct Progress {
    pub windows: AtomicU64,
    pub found: AtomicU64,
    /// Lower bound of the window currently being swept.
    pub current: AtomicU64,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            windows: AtomicU64::new(0),
            found: AtomicU64::new(0),
            current: AtomicU64::new(0),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Record one finished window that emitted `emitted` primes.
    #[inline]
    pub fn record_window(&self, low: u64, emitted: u64) {
        self.windows.fetch_add(1, Ordering::Relaxed);
        self.found.fetch_add(emitted, Ordering::Relaxed);
        self.current.store(low, Ordering::Relaxed);
    }

    pub fn start_reporter(self: &Arc<Self>, interval: Duration) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || loop {
            thread::park_timeout(interval);
            if progress.shutdown.load(Ordering::Relaxed) {
                break;
            }
            progress.print_status();
        })
    }

    pub fn stop_reporter(&self, handle: thread::JoinHandle<()>) {
        self.stop();
        handle.thread().unpark();
        let _ = handle.join();
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let windows = self.windows.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let current = self.current.load(Ordering::Relaxed);
        let rate = if elapsed.as_secs() > 0 {
            found as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let h = elapsed.as_secs() / 3600;
        let m = (elapsed.as_secs() % 3600) / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            current,
            windows,
            found,
            rate = format_args!("{:.2}", rate),
            elapsed = format_args!("{:02}:{:02}:{:02}", h, m, s),
            "sieve progress"
        );
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
