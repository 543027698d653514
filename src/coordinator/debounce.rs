//! Single-slot pending-task mailbox for debounced analysis.
//!
//! At most one scheduled run waits at any time. Installing a new one cancels
//! whatever was waiting.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug)]
struct Pending {
    ticket: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct Slot {
    next_ticket: u64,
    pending: Option<Pending>,
}

#[derive(Debug, Default)]
pub(crate) struct DebounceSlot {
    slot: Mutex<Slot>,
}

impl DebounceSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancel any waiting task and install a new one.
    ///
    /// Returns the ticket identifying the new task and the token it must watch.
    pub(crate) fn schedule(&self) -> (u64, CancellationToken) {
        let mut slot = self.slot.lock();
        slot.next_ticket += 1;
        let ticket = slot.next_ticket;
        let token = CancellationToken::new();

        if let Some(previous) = slot.pending.replace(Pending {
            ticket,
            token: token.clone(),
        }) {
            trace!("Debounce: ticket {} superseded by {}", previous.ticket, ticket);
            previous.token.cancel();
        }
        (ticket, token)
    }

    /// Called by a task whose quiet period elapsed. Empties the slot if the
    /// task is still the installed one; returns `false` if it was superseded.
    pub(crate) fn fire(&self, ticket: u64) -> bool {
        let mut slot = self.slot.lock();
        let is_current = matches!(
            slot.pending.as_ref(),
            Some(current) if current.ticket == ticket && !current.token.is_cancelled()
        );
        if is_current {
            slot.pending = None;
        }
        is_current
    }

    /// Cancel the waiting task, if any.
    pub(crate) fn cancel(&self) -> bool {
        match self.slot.lock().pending.take() {
            Some(previous) => {
                trace!("Debounce: ticket {} cancelled", previous.ticket);
                previous.token.cancel();
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }
}
