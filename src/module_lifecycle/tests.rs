// Tests for the view machine wired to a store through the status bridge

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::super::bridge::StatusBridge;
    use super::super::mocks::MockStatusStore;
    use super::super::state_machine::{ViewChange, ViewHandle};
    use super::super::traits::StatusStore;
    use super::super::types::*;

    fn attach(initial: UserModuleStatus) -> (Rc<MockStatusStore>, ViewHandle, StatusBridge) {
        let store = Rc::new(MockStatusStore::new(initial));
        let handle = ViewHandle::new(store.status());
        let bridge = StatusBridge::attach(store.clone(), handle.clone());
        (store, handle, bridge)
    }

    #[test]
    fn test_bridge_emits_exactly_one_event_per_status_change() {
        let (store, handle, _bridge) = attach(UserModuleStatus::NonExistent);

        let seen: Rc<RefCell<Vec<ViewChange>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        handle.observe(move |change| sink.borrow_mut().push(change));

        store.set_status(UserModuleStatus::Open);
        store.set_status(UserModuleStatus::ClosedByLiquidation);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].event, ModuleEvent::ModuleOpened);
        assert_eq!(seen[1].event, ModuleEvent::ModuleLiquidated);
        assert_eq!(handle.current_view(), ModuleView::Liquidated);
    }

    #[test]
    fn test_bridge_ignores_unchanged_status_notifications() {
        let (store, handle, _bridge) = attach(UserModuleStatus::NonExistent);

        store.set_status(UserModuleStatus::Open);
        assert_eq!(handle.current_view(), ModuleView::Active);

        // Poll ticks that report the same status must not re-dispatch.
        store.notify();
        store.notify();

        assert_eq!(handle.history().len(), 1);
        assert_eq!(handle.current_view(), ModuleView::Active);
    }

    #[test]
    fn test_bridge_confirms_pending_open() {
        let (store, handle, _bridge) = attach(UserModuleStatus::NonExistent);

        handle.dispatch(ModuleEvent::OpenModulePressed);
        assert_eq!(handle.current_view(), ModuleView::Opening);

        // Transaction lands; store observes the new status.
        store.set_status(UserModuleStatus::Open);
        assert_eq!(handle.current_view(), ModuleView::Active);
    }

    #[test]
    fn test_bridge_confirms_close_while_closing() {
        let (store, handle, _bridge) = attach(UserModuleStatus::Open);
        assert_eq!(handle.current_view(), ModuleView::Active);

        handle.dispatch(ModuleEvent::CloseModulePressed);
        assert_eq!(handle.current_view(), ModuleView::Closing);

        store.set_status(UserModuleStatus::ClosedByOwner);
        assert_eq!(handle.current_view(), ModuleView::None);
    }

    #[test]
    fn test_liquidation_interrupts_adjustment() {
        let (store, handle, _bridge) = attach(UserModuleStatus::Open);

        handle.dispatch(ModuleEvent::AdjustModulePressed);
        assert_eq!(handle.current_view(), ModuleView::Adjusting);

        // A third party liquidates the module while the user is mid-form.
        store.set_status(UserModuleStatus::ClosedByLiquidation);
        assert_eq!(handle.current_view(), ModuleView::Liquidated);
    }

    #[test]
    fn test_bridge_detaches_on_drop() {
        let (store, handle, bridge) = attach(UserModuleStatus::NonExistent);
        assert_eq!(store.subscriber_count(), 1);

        drop(bridge);
        assert_eq!(store.subscriber_count(), 0);

        // With the bridge gone the machine no longer tracks the store.
        store.set_status(UserModuleStatus::Open);
        assert_eq!(handle.current_view(), ModuleView::None);
    }

    #[test]
    fn test_duplicate_confirmation_after_reattach_is_noop() {
        let store = Rc::new(MockStatusStore::new(UserModuleStatus::Open));
        let handle = ViewHandle::new(store.status());
        assert_eq!(handle.current_view(), ModuleView::Active);

        let _bridge = StatusBridge::attach(store.clone(), handle.clone());

        // The bridge snapshots the status at attach time, so the confirmation
        // for the already-reflected status is never replayed.
        store.notify();
        assert_eq!(handle.history().len(), 0);
        assert_eq!(handle.current_view(), ModuleView::Active);
    }
}
