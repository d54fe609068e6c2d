use std::sync::Once;

use jobdeck_core::{update, AppState, Effect, JobFilters, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

fn fetches_with_search<'a>(effects: &'a [Effect], needle: &str) -> Vec<&'a Effect> {
    effects
        .iter()
        .filter(|effect| match effect {
            Effect::FetchJobs { query } => query
                .iter()
                .any(|(key, value)| key == "search" && value == needle),
            _ => false,
        })
        .collect()
}

#[test]
fn settled_search_is_applied_and_resets_pagination() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::PageRequested { skip: 40 });

    let (state, effects) = update(state, Msg::SearchEdited("engineer".to_string()));
    let generation = match effects.as_slice() {
        [Effect::ScheduleSearchSettle { generation }] => *generation,
        other => panic!("expected settle effect, got {other:?}"),
    };

    let (state, effects) = update(state, Msg::SearchSettled { generation });
    assert_eq!(state.filters().search, "engineer");
    assert_eq!(state.filters().skip, 0);
    assert_eq!(fetches_with_search(&effects, "engineer").len(), 1);
}

#[test]
fn search_cleared_within_settle_window_never_fetches() {
    init_logging();
    let state = AppState::new();

    // Type "engineer", then clear it before the first settle fires.
    let (state, effects) = update(state, Msg::SearchEdited("engineer".to_string()));
    let stale = match effects.as_slice() {
        [Effect::ScheduleSearchSettle { generation }] => *generation,
        other => panic!("expected settle effect, got {other:?}"),
    };
    let (state, effects) = update(state, Msg::SearchEdited(String::new()));
    let latest = match effects.as_slice() {
        [Effect::ScheduleSearchSettle { generation }] => *generation,
        other => panic!("expected settle effect, got {other:?}"),
    };
    assert!(latest > stale);

    // The stale settle is ignored; the latest settle changes nothing.
    let (state, effects) = update(state, Msg::SearchSettled { generation: stale });
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::SearchSettled { generation: latest });
    assert!(effects.is_empty());
    assert_eq!(state.filters().search, "");
}

#[test]
fn structured_filter_change_resets_nonzero_skip() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(state, Msg::PageRequested { skip: 60 });
    assert_eq!(effects.len(), 1);
    assert_eq!(state.filters().skip, 60);

    let (state, effects) = update(state, Msg::StatusFilterSet("applied".to_string()));
    assert_eq!(state.filters().skip, 0);
    assert_eq!(state.filters().status, "applied");
    match effects.as_slice() {
        [Effect::FetchJobs { query }] => {
            assert!(query.contains(&("skip".to_string(), "0".to_string())));
            assert!(query.contains(&("status".to_string(), "applied".to_string())));
        }
        other => panic!("expected fetch effect, got {other:?}"),
    }
}

#[test]
fn unchanged_filter_value_fires_no_fetch() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::SourceFilterSet("remoteok".to_string()));

    let (state, effects) = update(state, Msg::SourceFilterSet("remoteok".to_string()));
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::PageRequested { skip: 0 });
    assert!(effects.is_empty());
}

#[test]
fn share_pairs_round_trip_is_lossless() {
    init_logging();
    let mut filters = JobFilters::default();
    filters.apply_search("rust".to_string());
    filters.set_status("applied".to_string());
    filters.set_min_score(Some(70));
    filters.set_skip(40);

    let pairs = filters.share_pairs();
    let restored = JobFilters::from_share_pairs(
        pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );
    assert_eq!(restored, filters);
}

#[test]
fn share_pairs_omit_defaults() {
    init_logging();
    let filters = JobFilters::default();
    assert!(filters.share_pairs().is_empty());

    let mut filters = JobFilters::default();
    filters.set_min_salary(Some(90_000));
    let pairs = filters.share_pairs();
    assert_eq!(
        pairs,
        vec![("min_salary".to_string(), "90000".to_string())]
    );
}
