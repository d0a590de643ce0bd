// Module View Library - Trove/Module UI View-State Machine
// This exposes the view-state machine and its store bridge for UI integration

pub mod config;
pub mod module_lifecycle;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{init_config, ModuleViewConfig, ObservabilityConfig};
pub use module_lifecycle::{
    transition, ModuleEvent, ModuleView, ModuleViewMachine, ObserverId, StatusBridge,
    StatusParseError, StatusStore, SubscriptionId, UserModuleStatus, ViewChange, ViewHandle,
    ViewTransitionRecord,
};
pub use telemetry::init_telemetry;
