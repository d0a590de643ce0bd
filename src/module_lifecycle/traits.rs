// Traits for dependency injection - the store boundary stays swappable for tests

use super::types::UserModuleStatus;

/// Handle returned by [`StatusStore::subscribe`], used for cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// External store boundary.
///
/// The store owns how it obtains the on-chain status (polling cadence, RPC,
/// caching); this crate only requires a readable current value and change
/// notifications. Callbacks are invoked synchronously on the thread that owns
/// the store, once per observed change.
pub trait StatusStore {
    /// Last-known on-chain status of the user's module.
    fn status(&self) -> UserModuleStatus;

    /// Register a callback invoked whenever the status changes.
    fn subscribe(&self, callback: Box<dyn Fn(UserModuleStatus)>) -> SubscriptionId;

    /// Remove a previously registered callback.
    fn unsubscribe(&self, id: SubscriptionId);
}
