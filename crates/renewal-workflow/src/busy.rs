/*
[INPUT]:  Async operations that talk to the renewal service
[OUTPUT]: Scoped busy signal with guaranteed release
[POS]:    Single-slot admission gate shared by the Orchestrator and the screen
[UPDATE]: When changing how the screen observes in-flight work
*/

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::watch;

/// Receives the busy flag whenever it flips
pub trait BusyIndicator: Send + Sync {
    fn set_busy(&self, busy: bool);
}

impl BusyIndicator for watch::Sender<bool> {
    fn set_busy(&self, busy: bool) {
        self.send_replace(busy);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusyError {
    #[error("another operation is already in flight")]
    AlreadyBusy,
}

struct BusyInner {
    in_flight: AtomicBool,
    indicator: Arc<dyn BusyIndicator>,
}

/// At most one guard exists at a time; dropping it releases the slot
#[derive(Clone)]
pub struct BusyGate {
    inner: Arc<BusyInner>,
}

impl std::fmt::Debug for BusyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyGate")
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl BusyGate {
    pub fn new(indicator: Arc<dyn BusyIndicator>) -> Self {
        Self {
            inner: Arc::new(BusyInner {
                in_flight: AtomicBool::new(false),
                indicator,
            }),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Take the slot, or fail if an operation already holds it
    pub fn acquire(&self) -> Result<BusyGuard, BusyError> {
        self.inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BusyError::AlreadyBusy)?;
        self.inner.indicator.set_busy(true);
        Ok(BusyGuard {
            inner: self.inner.clone(),
        })
    }

    /// Run one future while holding the slot
    pub async fn run_exclusive<F, T>(&self, operation: F) -> Result<T, BusyError>
    where
        F: Future<Output = T>,
    {
        let _guard = self.acquire()?;
        Ok(operation.await)
    }
}

#[must_use = "the busy slot is released as soon as the guard is dropped"]
pub struct BusyGuard {
    inner: Arc<BusyInner>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::Release);
        self.inner.indicator.set_busy(false);
    }
}
