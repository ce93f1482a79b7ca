//! Cooperative cancellation shared across walker and worker threads.
//!
//! One token governs a request: it flips either when the head limit is
//! satisfied (a natural stop) or when the monotonic deadline expires (a
//! timeout). Workers poll it at fixed observation points: before opening
//! each file, per sink event, and per assembled fragment.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

pub(crate) struct CancelToken {
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    stopped: AtomicBool,
    timed_out: AtomicBool,
}

impl CancelToken {
    /// Arm the token at request entry. The deadline, if any, is measured
    /// from this call.
    pub(crate) fn new(timeout: Option<Duration>) -> CancelToken {
        CancelToken {
            deadline: timeout.map(|t| Instant::now() + t),
            timeout,
            stopped: AtomicBool::new(false),
            timed_out: AtomicBool::new(false),
        }
    }

    /// Request a natural stop (head limit reached). Workers wind down at
    /// their next observation point.
    pub(crate) fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// True once the request should cease doing work, for either reason.
    /// Lazily latches `timed_out` when the deadline has passed.
    pub(crate) fn should_stop(&self) -> bool {
        if self.stopped.load(Ordering::Acquire) || self.timed_out.load(Ordering::Acquire) {
            return true;
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.timed_out.store(true, Ordering::Release);
            return true;
        }
        false
    }

    /// True if cancellation was caused by deadline expiry.
    pub(crate) fn timed_out(&self) -> bool {
        self.timed_out.load(Ordering::Acquire)
    }

    /// Force the timed-out state, used when the assembler observes the
    /// deadline while idle.
    pub(crate) fn mark_timed_out(&self) {
        self.timed_out.store(true, Ordering::Release);
    }

    /// The armed deadline, if a timeout was requested.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The originally requested timeout, for error reporting.
    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The error to surface when this token's deadline expired.
    pub(crate) fn timeout_error(&self) -> crate::error::SearchError {
        crate::error::SearchError::Timeout(self.timeout.unwrap_or_default())
    }

    /// Sink-side observation point: surfaces cancellation as an
    /// `Interrupted` I/O error so the searcher unwinds out of the file.
    pub(crate) fn check(&self) -> io::Result<()> {
        if self.should_stop() {
            return Err(io::Error::new(
                io::ErrorKind::Interrupted,
                "search cancelled",
            ));
        }
        Ok(())
    }
}
