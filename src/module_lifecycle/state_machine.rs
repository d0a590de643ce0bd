use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::types::{ModuleEvent, ModuleView, UserModuleStatus};
use crate::config::ModuleViewConfig;

/// Pure transition function over (view, event).
///
/// Total and O(1): every pair is defined, with unmapped pairs resolving to the
/// current view unchanged. Unknown or late events are a no-op, never an error.
pub fn transition(current: ModuleView, event: ModuleEvent) -> ModuleView {
    use ModuleEvent::*;
    use ModuleView::*;

    match (current, event) {
        (None, OpenModulePressed) => Opening,
        (None, ModuleOpened) => Active,

        (Opening, CancelAdjustModulePressed) => None,
        (Opening, ModuleOpened) => Active,

        (Active, AdjustModulePressed) => Adjusting,
        (Active, CloseModulePressed) => Closing,
        (Active, ModuleClosed) => None,
        (Active, ModuleLiquidated) => Liquidated,
        (Active, ModuleRedeemed) => Redeemed,

        (Adjusting | Closing, CancelAdjustModulePressed) => Active,
        (Adjusting | Closing, ModuleAdjusted) => Active,
        (Adjusting | Closing, ModuleClosed) => None,
        (Adjusting | Closing, ModuleLiquidated) => Liquidated,
        (Adjusting | Closing, ModuleRedeemed) => Redeemed,

        (Liquidated | Redeemed, OpenModulePressed) => Opening,
        (Liquidated | Redeemed, ModuleOpened) => Active,
        (Liquidated | Redeemed, ModuleSurplusCollateralClaimed) => None,

        (unchanged, _) => unchanged,
    }
}

/// A view change delivered to observers. Only produced when the view actually
/// moved; identity transitions are not announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewChange {
    pub from: ModuleView,
    pub to: ModuleView,
    pub event: ModuleEvent,
}

/// Audit record of one applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTransitionRecord {
    pub from: ModuleView,
    pub to: ModuleView,
    pub event: ModuleEvent,
    pub at: DateTime<Utc>,
}

/// Handle returned by `ViewHandle::observe`, used to detach the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ObserverFn = Rc<dyn Fn(ViewChange)>;

/// Holds the current view and the audit trail of applied transitions.
///
/// The machine is single-owner and single-threaded: all mutation goes through
/// `dispatch` on the owning [`ViewHandle`], readers only observe. One machine
/// exists per user session; it is reconstructed from store status at session
/// start and discarded on teardown, never persisted.
pub struct ModuleViewMachine {
    view: ModuleView,
    history: Vec<ViewTransitionRecord>,
    observers: Vec<(ObserverId, ObserverFn)>,
    next_observer: u64,
    strict: bool,
}

impl std::fmt::Debug for ModuleViewMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleViewMachine")
            .field("view", &self.view)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .field("strict", &self.strict)
            .finish()
    }
}

impl ModuleViewMachine {
    pub fn new(status: UserModuleStatus) -> Self {
        Self::with_config(status, &ModuleViewConfig::default())
    }

    pub fn with_config(status: UserModuleStatus, config: &ModuleViewConfig) -> Self {
        let view = ModuleView::from_status(status);
        info!(
            status = %status,
            view = ?view,
            strict = %config.strict_transitions,
            "Module view machine created"
        );
        Self {
            view,
            history: Vec::new(),
            observers: Vec::new(),
            next_observer: 0,
            strict: config.strict_transitions,
        }
    }

    pub fn current_view(&self) -> ModuleView {
        self.view
    }

    pub fn history(&self) -> &[ViewTransitionRecord] {
        &self.history
    }

    /// Apply one event. The held view is replaced before anything else can
    /// observe it, so readers never see a partially-updated state.
    fn apply(&mut self, event: ModuleEvent) -> Option<ViewChange> {
        let from = self.view;
        let to = transition(from, event);

        if to == from {
            if self.strict {
                // Identity is kept in all builds; strict mode only makes
                // dead dispatches visible.
                warn!(view = ?from, event = ?event, "Unmapped view transition ignored");
            } else {
                debug!(view = ?from, event = ?event, "View unchanged by event");
            }
            return Option::None;
        }

        self.view = to;
        self.history.push(ViewTransitionRecord {
            from,
            to,
            event,
            at: Utc::now(),
        });
        info!(from = ?from, to = ?to, event = ?event, "Module view transition");
        Some(ViewChange { from, to, event })
    }

    fn add_observer(&mut self, callback: ObserverFn) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, callback));
        id
    }

    fn remove_observer(&mut self, id: ObserverId) {
        self.observers.retain(|(oid, _)| *oid != id);
    }
}

/// Cheaply cloneable shared handle to the session's view machine.
///
/// Construct one at session start and pass clones down to whatever needs to
/// read the view or dispatch events; never create a second machine for the
/// same session. Single-threaded by design, matching the UI event loop that
/// owns it.
#[derive(Clone)]
pub struct ViewHandle {
    inner: Rc<RefCell<ModuleViewMachine>>,
}

impl std::fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ViewHandle").field(&self.inner.borrow()).finish()
    }
}

impl ViewHandle {
    pub fn new(status: UserModuleStatus) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModuleViewMachine::new(status))),
        }
    }

    pub fn with_config(status: UserModuleStatus, config: &ModuleViewConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModuleViewMachine::with_config(
                status, config,
            ))),
        }
    }

    pub fn current_view(&self) -> ModuleView {
        self.inner.borrow().current_view()
    }

    /// Apply `event` to the current view. Always succeeds; events with no
    /// entry in the transition table leave the view unchanged and notify
    /// nobody.
    pub fn dispatch(&self, event: ModuleEvent) {
        let (change, observers) = {
            let mut machine = self.inner.borrow_mut();
            let change = machine.apply(event);
            let observers: Vec<ObserverFn> = if change.is_some() {
                machine.observers.iter().map(|(_, cb)| cb.clone()).collect()
            } else {
                Vec::new()
            };
            (change, observers)
        };

        // Notify after the borrow is released so observers can read the
        // handle (and re-dispatch) without panicking.
        if let Some(change) = change {
            for callback in observers {
                callback(change);
            }
        }
    }

    /// Register a callback invoked on every real view change.
    pub fn observe(&self, callback: impl Fn(ViewChange) + 'static) -> ObserverId {
        self.inner.borrow_mut().add_observer(Rc::new(callback))
    }

    /// Detach a previously registered observer.
    pub fn forget(&self, id: ObserverId) {
        self.inner.borrow_mut().remove_observer(id);
    }

    pub fn history(&self) -> Vec<ViewTransitionRecord> {
        self.inner.borrow().history().to_vec()
    }
}
