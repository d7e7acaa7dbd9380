//! Busy flag guarding query submission

use std::sync::atomic::{AtomicBool, Ordering};

use crate::conversation::{EventSink, SessionEvent};

/// Single-in-flight flag
///
/// Acquiring returns a guard; dropping the guard is the only way to clear the
/// flag, so every exit path releases it exactly once.
#[derive(Debug, Default)]
pub struct BusyFlag {
    busy: AtomicBool,
    events: EventSink,
}

impl BusyFlag {
    pub fn new(events: EventSink) -> Self {
        Self {
            busy: AtomicBool::new(false),
            events,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Set the flag, or `None` if it is already set
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        self.events.emit(SessionEvent::BusyChanged(true));
        Some(BusyGuard { flag: self })
    }
}

/// Clears the busy flag on drop
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::SeqCst);
        self.flag.events.emit(SessionEvent::BusyChanged(false));
    }
}
