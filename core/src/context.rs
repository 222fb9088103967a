//! Cooperative cancellation for blocking lookups.
//!
//! # Design
//! A `Context` carries an optional deadline and an optional shared cancel
//! flag. The client only forwards it — enforcement is the transport's job.
//! The default transport checks `ensure_active` before issuing a request and
//! converts the remaining deadline time into a per-request timeout; it cannot
//! interrupt a transfer already in flight, which is the usual contract for
//! cooperative cancellation over blocking I/O.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::transport::TransportError;

/// Deadline and cancel signal forwarded to the transport on every lookup.
///
/// `Context::background()` (also `Default`) carries neither: a lookup run
/// under it blocks until the transport completes on its own terms.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

/// Handle that cancels the `Context` it was split from.
///
/// Cloneable; any clone may cancel. Cancellation is sticky — there is no
/// un-cancel.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl Context {
    /// Context with no deadline and no cancel signal.
    pub fn background() -> Self {
        Self::default()
    }

    /// Context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Context with an absolute deadline.
    pub fn with_deadline(deadline: Instant) -> Self {
        Context {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    /// Attach a cancel signal, returning the new context and its handle.
    pub fn cancellable(self) -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = Context {
            deadline: self.deadline,
            cancel: Some(Arc::clone(&flag)),
        };
        (ctx, CancelHandle(flag))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline; `None` when there is no deadline.
    /// Once the deadline has passed this returns `Some(Duration::ZERO)`.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fail fast if the context is already cancelled or past its deadline.
    pub fn ensure_active(&self) -> Result<(), TransportError> {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self.remaining() == Some(Duration::ZERO) {
            return Err(TransportError::DeadlineExceeded);
        }
        Ok(())
    }
}
