// Module Lifecycle - Trove View-State Machine
//
// Maps on-chain position status transitions plus user-interaction intents to
// the small set of UI view states, with a bridge that keeps the machine
// consistent with the externally observed store.

pub mod bridge;
pub mod state_machine;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod mocks;

#[cfg(test)]
pub mod tests;

pub use bridge::StatusBridge;
pub use state_machine::{
    transition, ModuleViewMachine, ObserverId, ViewChange, ViewHandle, ViewTransitionRecord,
};
pub use traits::{StatusStore, SubscriptionId};
pub use types::{ModuleEvent, ModuleView, StatusParseError, UserModuleStatus};
