use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

use super::state_machine::ViewHandle;
use super::traits::{StatusStore, SubscriptionId};
use super::types::{ModuleEvent, UserModuleStatus};

/// Keeps the view machine consistent with the externally observed module
/// status, so the UI never drives that synchronization by hand.
///
/// On each status change the bridge synthesizes at most one confirmation
/// event and dispatches it to the machine. Repeated notifications of an
/// unchanged status are ignored, and the transition table itself is
/// idempotent for confirmation events, so duplicate store wakeups are
/// harmless. Detaches from the store on drop.
pub struct StatusBridge {
    store: Rc<dyn StatusStore>,
    subscription: SubscriptionId,
}

impl StatusBridge {
    /// Subscribe `handle` to status changes from `store`.
    ///
    /// The machine is expected to have been created from the store's current
    /// status; the bridge only reacts to changes observed after attachment.
    pub fn attach(store: Rc<dyn StatusStore>, handle: ViewHandle) -> Self {
        let last_seen: Rc<Cell<UserModuleStatus>> = Rc::new(Cell::new(store.status()));

        let seen = last_seen.clone();
        let subscription = store.subscribe(Box::new(move |status| {
            if status == seen.get() {
                debug!(status = %status, "Status notification unchanged, ignoring");
                return;
            }
            seen.set(status);

            match ModuleEvent::from_status(status) {
                Some(event) => {
                    info!(status = %status, event = ?event, "Status change observed");
                    handle.dispatch(event);
                }
                None => {
                    // nonExistent is not a valid post-transition status.
                    debug!(status = %status, "Status change carries no confirmation event");
                }
            }
        }));

        Self {
            store,
            subscription,
        }
    }
}

impl Drop for StatusBridge {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
