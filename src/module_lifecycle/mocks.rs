// Mock implementations for testing - no side effects

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::module_lifecycle::traits::*;
use crate::module_lifecycle::types::*;

/// Mock status store driven entirely by the test.
///
/// `set_status` records the value and notifies every live subscriber, the way
/// a poll-driven store would after observing a chain update. Notifications are
/// delivered even when the value did not change, so tests can exercise the
/// bridge's unchanged-status suppression.
pub struct MockStatusStore {
    status: Cell<UserModuleStatus>,
    subscribers: RefCell<HashMap<SubscriptionId, Box<dyn Fn(UserModuleStatus)>>>,
    next_subscription: Cell<u64>,
    notifications_sent: Cell<u32>,
}

impl Default for MockStatusStore {
    fn default() -> Self {
        Self::new(UserModuleStatus::NonExistent)
    }
}

impl MockStatusStore {
    pub fn new(status: UserModuleStatus) -> Self {
        Self {
            status: Cell::new(status),
            subscribers: RefCell::new(HashMap::new()),
            next_subscription: Cell::new(0),
            notifications_sent: Cell::new(0),
        }
    }

    /// Update the stored status and notify all subscribers.
    pub fn set_status(&self, status: UserModuleStatus) {
        self.status.set(status);
        self.notify();
    }

    /// Re-deliver the current status without changing it, simulating a store
    /// that wakes up on every poll tick.
    pub fn notify(&self) {
        for callback in self.subscribers.borrow().values() {
            self.notifications_sent.set(self.notifications_sent.get() + 1);
            callback(self.status.get());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn notifications_sent(&self) -> u32 {
        self.notifications_sent.get()
    }
}

impl StatusStore for MockStatusStore {
    fn status(&self) -> UserModuleStatus {
        self.status.get()
    }

    fn subscribe(&self, callback: Box<dyn Fn(UserModuleStatus)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().insert(id, callback);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().remove(&id);
    }
}
