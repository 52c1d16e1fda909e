//! Admission gate bounding how many directory handles are open at once
//!
//! Built on a tokio [`Semaphore`]. A [`GatePermit`] is a scoped slot: it is
//! returned to the gate either by an explicit [`GatePermit::release`] or when
//! the permit is dropped, whichever comes first, and never twice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use crate::error::WalkError;

#[derive(Debug)]
struct GateState {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    held: AtomicUsize,
    peak: AtomicUsize,
}

/// Counting gate with a fixed capacity
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    state: Arc<GateState>,
}

impl AdmissionGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(GateState {
                semaphore: Arc::new(Semaphore::new(capacity)),
                capacity,
                held: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }),
        }
    }

    /// Wait for a free slot and reserve it
    pub async fn acquire(&self) -> Result<GatePermit, WalkError> {
        let permit = Arc::clone(&self.state.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| WalkError::GateClosed)?;

        let held = self.state.held.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.peak.fetch_max(held, Ordering::SeqCst);
        if held == self.state.capacity {
            trace!(capacity = self.state.capacity, "admission gate saturated");
        }

        Ok(GatePermit {
            permit: Some(permit),
            state: Arc::clone(&self.state),
        })
    }

    pub fn capacity(&self) -> usize {
        self.state.capacity
    }

    /// Slots free right now
    pub fn available(&self) -> usize {
        self.state.semaphore.available_permits()
    }

    /// Most slots ever held at the same time
    pub fn peak(&self) -> usize {
        self.state.peak.load(Ordering::SeqCst)
    }

    /// Closes the gate; pending and future acquisitions fail with
    /// [`WalkError::GateClosed`]
    pub fn close(&self) {
        self.state.semaphore.close();
    }
}

/// One reserved gate slot
#[derive(Debug)]
pub struct GatePermit {
    permit: Option<OwnedSemaphorePermit>,
    state: Arc<GateState>,
}

impl GatePermit {
    /// Return the slot now. Later calls, and the eventual drop, do nothing.
    pub fn release(&mut self) {
        if let Some(permit) = self.permit.take() {
            self.state.held.fetch_sub(1, Ordering::SeqCst);
            drop(permit);
        }
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.release();
    }
}
