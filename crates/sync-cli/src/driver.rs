//! Periodic pass driver and stop handling

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use sync_core::{EventSink, PassOptions, PassReport, SyncTarget, run_pass};

use crate::error::Result;

/// Longest uninterrupted sleep while waiting for the next tick.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Shared stop flag, set by a signal handler or by tests.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Route SIGINT/SIGTERM (and SIGQUIT where it exists) to this handle.
    ///
    /// The first signal only sets the flag so the current pass can finish.
    /// A second one terminates the process immediately.
    pub fn register_signals(&self) -> Result<()> {
        for &signal in TERM_SIGNALS {
            flag::register_conditional_shutdown(signal, 1, Arc::clone(&self.flag))?;
            flag::register(signal, Arc::clone(&self.flag))?;
        }
        Ok(())
    }

    /// Sleep for up to `timeout`, returning early with `true` once a stop
    /// is requested.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_stop_requested() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(POLL_SLICE.min(deadline - now));
        }
    }
}

/// Runs passes over one target on a fixed interval.
///
/// Passes never overlap: the interval is measured from the end of one pass
/// to the start of the next.
pub struct Driver<'a> {
    target: &'a SyncTarget,
    options: PassOptions,
    interval: Duration,
}

impl<'a> Driver<'a> {
    pub fn new(target: &'a SyncTarget, options: PassOptions, interval: Duration) -> Self {
        Self {
            target,
            options,
            interval,
        }
    }

    pub fn run_once(&self, sink: &dyn EventSink) -> sync_core::Result<PassReport> {
        run_pass(self.target, &self.options, sink)
    }

    /// Run passes until `stop` is requested, handing each report to
    /// `on_report`. Returns the number of completed passes.
    ///
    /// A pass that fails as a whole (for example because the source folder
    /// disappeared) is logged and retried on the next tick. So is a report
    /// that cannot be delivered, such as a write to a closed stdout.
    pub fn run<F>(&self, stop: &StopHandle, sink: &dyn EventSink, mut on_report: F) -> usize
    where
        F: FnMut(&PassReport) -> Result<()>,
    {
        let mut passes = 0;
        while !stop.is_stop_requested() {
            match self.run_once(sink) {
                Ok(report) => {
                    passes += 1;
                    if let Err(e) = on_report(&report) {
                        tracing::error!(error = %e, "Failed to report pass");
                    }
                }
                Err(e) => tracing::error!(error = %e, "Synchronization pass failed"),
            }

            if stop.wait(self.interval) {
                break;
            }
        }
        tracing::info!(passes, "Stop requested, shutting down");
        passes
    }
}
