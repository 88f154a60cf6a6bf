//! Tests for the filter engine.

use super::*;
use crate::model::{Facility, Severity};
use crate::state::RemoteState;

fn with_remote(last_id: Option<u64>) -> State {
    let mut state = State::default();
    state.remote = Some(RemoteState {
        filter: state.local.filter.clone(),
        entries: Vec::new(),
        first_id: Some(1),
        last_id,
    });
    state
}

#[test]
fn set_severity_pushes_whole_filter_and_keeps_live_cursor() {
    let mut state = State::default();

    let effect = set_filter_value(
        &mut state,
        FilterField::Severity,
        FilterValue::Severity(Severity::Error),
    );

    let pushed = effect.filter().expect("filter should be pushed");
    assert_eq!(pushed.severity, Some(Severity::Error));
    assert_eq!(pushed.last_id, None);
    assert_eq!(pushed.max_results, Some(50));
    assert_eq!(*pushed, state.local.filter);
    assert!(state.local.page_last_ids.is_empty(), "no pagination reset");
}

#[test]
fn last_id_edit_is_refused() {
    let mut state = State::default();
    let before = state.clone();

    let effect = set_filter_value(&mut state, FilterField::LastId, FilterValue::Id(5));

    assert_eq!(effect, Effect::None);
    assert_eq!(state, before);
}

#[test]
fn mismatched_value_is_refused_without_push() {
    let mut state = State::default();
    let before = state.clone();

    let effect = set_filter_value(&mut state, FilterField::Hostname, FilterValue::Count(3));

    assert_eq!(effect, Effect::None);
    assert_eq!(state, before);
}

#[test]
fn clear_filter_keeps_page_size_and_cursor() {
    let mut state = with_remote(Some(500));
    let _ = set_frozen(&mut state, true);
    let _ = set_filter_value(&mut state, FilterField::MaxResults, FilterValue::Count(20));
    let _ = set_filter_value(&mut state, FilterField::Facility, FilterValue::Facility(Facility::Mail));
    let _ = set_filter_value(&mut state, FilterField::Msg, FilterValue::Text("disk".into()));

    let effect = clear_filter(&mut state);

    let pushed = effect.filter().unwrap();
    assert_eq!(pushed.max_results, Some(20));
    assert_eq!(pushed.last_id, Some(500));
    assert_eq!(pushed.facility, None);
    assert_eq!(pushed.msg, None);
}

#[test]
fn freezing_pins_newest_remote_id_and_seeds_stack() {
    let mut state = with_remote(Some(1000));

    let effect = set_frozen(&mut state, true);

    assert_eq!(effect.filter().unwrap().last_id, Some(1000));
    assert_eq!(state.local.page_last_ids, vec![1000]);
    assert!(!is_live(&state));
}

#[test]
fn freezing_before_any_snapshot_pins_zero() {
    let mut state = State::default();

    let _ = set_frozen(&mut state, true);

    assert_eq!(state.local.filter.last_id, Some(0));
    assert_eq!(state.local.page_last_ids, vec![0]);
}

#[test]
fn unfreezing_clears_cursor_and_stack() {
    let mut state = with_remote(Some(1000));
    let _ = set_frozen(&mut state, true);
    state.local.page_last_ids.push(951);

    let effect = set_frozen(&mut state, false);

    assert_eq!(effect.filter().unwrap().last_id, None);
    assert!(state.local.page_last_ids.is_empty());
    assert!(is_live(&state));
}

#[test]
fn set_frozen_to_current_mode_is_noop() {
    let mut state = with_remote(Some(10));
    assert_eq!(set_frozen(&mut state, false), Effect::None);

    let _ = set_frozen(&mut state, true);
    state.local.page_last_ids.push(5);
    let before = state.clone();
    assert_eq!(set_frozen(&mut state, true), Effect::None);
    assert_eq!(state, before);
}

#[test]
fn toggle_live_alternates() {
    let mut state = with_remote(Some(7));

    let _ = toggle_live(&mut state);
    assert!(!is_live(&state));
    let _ = toggle_live(&mut state);
    assert!(is_live(&state));
}

#[test]
fn frozen_styling_follows_remote_not_local() {
    let mut state = with_remote(Some(1000));

    let _ = set_frozen(&mut state, true);
    assert!(!is_live(&state), "local draft is frozen");
    assert!(!is_frozen_remote(&state), "server has not acknowledged yet");

    if let Some(remote) = state.remote.as_mut() {
        remote.filter = state.local.filter.clone();
    }
    assert!(is_frozen_remote(&state));
}

#[test]
fn active_filters_lists_set_predicates_in_order() {
    let mut filter = Filter::default();
    filter.msg = Some("disk".into());
    filter.severity = Some(Severity::Warning);
    filter.last_id = Some(3);

    let active = active_filters(&filter);

    let labels: Vec<_> = active.iter().map(|a| a.label).collect();
    assert_eq!(labels, vec!["Severity", "Msg"]);
    assert_eq!(active[0].value, "WARNING");
    assert_eq!(active[1].field, FilterField::Msg);
}

#[test]
fn active_filters_empty_for_default_filter() {
    assert!(active_filters(&Filter::default()).is_empty());
}

#[test]
fn setter_factory_binds_field() {
    let mut state = State::default();
    let set_hostname = filter_setter(FilterField::Hostname);

    let effect = set_hostname(&mut state, FilterValue::Text("gw01".to_string()));

    assert_eq!(effect.filter().unwrap().hostname.as_deref(), Some("gw01"));
    assert_eq!(state.local.filter.hostname.as_deref(), Some("gw01"));
}

#[test]
fn timestamp_shortcuts_copy_receipt_time() {
    let mut state = State::default();
    let entry: Entry = serde_json::from_str(
        r#"{"id": 9, "timestamp": 1700000000.5, "msg": {"facility": null, "severity": null,
            "version": 1, "timestamp": null, "hostname": null, "app_name": null,
            "procid": null, "msgid": null, "data": null, "msg": null}}"#,
    )
    .unwrap();

    let _ = set_timestamp_from_entry(&mut state, &entry);
    let effect = set_timestamp_to_entry(&mut state, &entry);

    let pushed = effect.filter().unwrap();
    assert_eq!(pushed.entry_timestamp_from, Some(1700000000.5));
    assert_eq!(pushed.entry_timestamp_to, Some(1700000000.5));
}

#[test]
fn page_size_restricted_to_options() {
    let mut state = State::default();

    assert_eq!(set_page_size(&mut state, 30, &[20, 50, 100]), Effect::None);
    assert_eq!(state.local.filter.max_results, Some(50));

    let effect = set_page_size(&mut state, 100, &[20, 50, 100]);
    assert_eq!(effect.filter().unwrap().max_results, Some(100));
}
