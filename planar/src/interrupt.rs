//! Cooperative cancellation.
//!
//! Long-running operations consult a per-thread interrupt flag at coarse
//! checkpoints (chain-overlap refinement, per-edge overlay work) and stop
//! with [`GeometryError::Interrupted`] at the next checkpoint after the
//! flag is raised. A cancelled operation leaves no partial result visible.

use planar_types::{GeometryError, Result};

use std::cell::Cell;

thread_local! {
    static INTERRUPT_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Request cancellation of the operation running on this thread.
pub fn request_interrupt() {
    INTERRUPT_REQUESTED.with(|flag| flag.set(true));
}

/// Clear a pending interrupt request, e.g. before starting a new operation.
pub fn clear_interrupt() {
    INTERRUPT_REQUESTED.with(|flag| flag.set(false));
}

/// `true` if an interrupt has been requested and not yet consumed.
pub fn interrupt_requested() -> bool {
    INTERRUPT_REQUESTED.with(|flag| flag.get())
}

/// Checkpoint: consume a pending request and fail, or continue.
pub(crate) fn check_interrupt() -> Result<()> {
    INTERRUPT_REQUESTED.with(|flag| {
        if flag.get() {
            flag.set(false);
            Err(GeometryError::Interrupted)
        } else {
            Ok(())
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interrupt_is_consumed_by_checkpoint() {
        clear_interrupt();
        assert!(check_interrupt().is_ok());
        request_interrupt();
        assert!(matches!(check_interrupt(), Err(GeometryError::Interrupted)));
        // consumed: the next checkpoint passes
        assert!(check_interrupt().is_ok());
    }
}
