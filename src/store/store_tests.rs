//! Tests for the versioned store.

use super::lens::{COLUMNS, FILTER, MENU, PAGE_LAST_IDS, REMOTE, SNACKBARS};
use super::*;
use crate::model::Severity;
use crate::state::{MenuState, RemoteState};
use std::sync::Mutex as StdMutex;

#[test]
fn new_store_starts_at_version_zero() {
    let store = Store::default();
    assert_eq!(store.version(), 0);
    assert_eq!(store.get(REMOTE), None);
}

#[test]
fn set_replaces_value_and_bumps_version() {
    let store = Store::default();

    store.set(MENU, MenuState { visible: true });

    assert!(store.get(MENU).visible);
    assert_eq!(store.version(), 1);
}

#[test]
fn set_with_equal_value_is_not_a_mutation() {
    let store = Store::default();
    let current = store.get(MENU);

    store.set(MENU, current);

    assert_eq!(store.version(), 0);
}

#[test]
fn change_transforms_current_value() {
    let store = Store::default();

    store.change(PAGE_LAST_IDS, |ids| {
        let mut ids = ids.clone();
        ids.push(10);
        ids
    });
    store.change(PAGE_LAST_IDS, |ids| {
        let mut ids = ids.clone();
        ids.push(5);
        ids
    });

    assert_eq!(store.get(PAGE_LAST_IDS), vec![10, 5]);
    assert_eq!(store.version(), 2);
}

#[test]
fn snapshots_are_immutable_after_later_writes() {
    let store = Store::default();
    let before = store.snapshot();

    store.change(FILTER, |filter| {
        let mut filter = filter.clone();
        filter.severity = Some(Severity::Error);
        filter
    });

    assert_eq!(before.state.local.filter.severity, None);
    assert_eq!(store.get(FILTER).severity, Some(Severity::Error));
    assert!(store.snapshot().version > before.version);
}

#[test]
fn update_returns_closure_result() {
    let store = Store::default();

    let count = store.update(|state| {
        state.local.snackbars.push("a".into());
        state.local.snackbars.len()
    });

    assert_eq!(count, 1);
    assert_eq!(store.get(SNACKBARS), vec!["a".to_string()]);
}

#[test]
#[should_panic(expected = "store accessed from inside its own update closure")]
fn reentrant_update_panics_instead_of_deadlocking() {
    let store = Store::default();
    let same = store.clone();

    store.update(|_| same.set(MENU, MenuState { visible: true }));
}

#[test]
fn store_recovers_after_reentrant_access() {
    let store = Store::default();
    let same = store.clone();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        store.update(|_| same.version())
    }));

    assert!(outcome.is_err());
    store.set(MENU, MenuState { visible: true });
    assert!(store.get(MENU).visible);
    assert_eq!(store.version(), 1);
}

#[test]
fn update_may_read_another_store() {
    let store = Store::default();
    let other = Store::default();
    other.set(MENU, MenuState { visible: true });

    store.update(|state| state.local.menu = other.get(MENU));

    assert!(store.get(MENU).visible);
}

#[test]
fn subscribers_see_every_effective_mutation() {
    let store = Store::default();
    let seen = Arc::new(StdMutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    store.subscribe(move |snapshot| {
        recorder.lock().unwrap().push(snapshot.version);
    });

    store.set(MENU, MenuState { visible: true });
    store.set(MENU, MenuState { visible: true });
    store.set(MENU, MenuState { visible: false });

    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = Store::default();
    let seen = Arc::new(StdMutex::new(0usize));
    let recorder = Arc::clone(&seen);
    let id = store.subscribe(move |_| *recorder.lock().unwrap() += 1);

    store.set(MENU, MenuState { visible: true });
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set(MENU, MenuState { visible: false });

    assert_eq!(*seen.lock().unwrap(), 1);
}

#[test]
fn listener_may_read_store_during_notification() {
    let store = Store::default();
    let reader = store.clone();
    let seen = Arc::new(StdMutex::new(None));
    let recorder = Arc::clone(&seen);
    store.subscribe(move |_| {
        *recorder.lock().unwrap() = Some(reader.get(COLUMNS).len());
    });

    store.set(MENU, MenuState { visible: true });

    assert_eq!(*seen.lock().unwrap(), Some(12));
}

#[test]
fn remote_is_replaced_wholesale() {
    let store = Store::default();
    let first = RemoteState {
        filter: store.get(FILTER),
        entries: Vec::new(),
        first_id: Some(1),
        last_id: Some(2),
    };
    let second = RemoteState {
        first_id: None,
        last_id: None,
        ..first.clone()
    };

    store.set(REMOTE, Some(first));
    store.set(REMOTE, Some(second.clone()));

    assert_eq!(store.get(REMOTE), Some(second));
}

#[test]
fn clones_share_one_tree() {
    let store = Store::default();
    let other = store.clone();

    other.set(MENU, MenuState { visible: true });

    assert!(store.get(MENU).visible);
}
