mod common;

use common::{article, init_logging, loaded, thumbnail_loads};
use lilnews_core::{update, AppState, Effect, Msg, ThumbnailView};
use pretty_assertions::assert_eq;

#[test]
fn visible_rows_start_one_loader_each() {
    init_logging();
    let state = loaded(vec![
        article("A", Some("http://img/a.png"), "X"),
        article("B", None, "Y"),
        article("C", Some("https://img/c.png"), "Z"),
    ]);

    let (state, effects) = update(state, Msg::RowsVisible { first: 0, count: 2 });

    assert_eq!(
        effects,
        vec![
            Effect::LoadThumbnail {
                ticket: 1,
                url: "http://img/a.png".to_string(),
            },
            Effect::LoadThumbnail {
                ticket: 2,
                url: String::new(),
            },
        ]
    );
    assert!(state.rows()[2].thumbnail().is_none());
}

#[test]
fn unchanged_visibility_does_not_refetch() {
    init_logging();
    let state = loaded(vec![article("A", Some("https://img/a.png"), "X")]);
    let (state, _) = update(state, Msg::RowsVisible { first: 0, count: 1 });
    let (_state, effects) = update(state, Msg::RowsVisible { first: 0, count: 1 });

    assert!(effects.is_empty());
}

#[test]
fn visibility_is_clamped_to_row_count() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (_state, effects) = update(state, Msg::RowsVisible { first: 0, count: 40 });

    assert_eq!(thumbnail_loads(&effects).len(), 1);
}

#[test]
fn loader_populates_exactly_once() {
    init_logging();
    let state = loaded(vec![article("A", Some("https://img/a.png"), "X")]);
    let (state, effects) = update(state, Msg::RowsVisible { first: 0, count: 1 });
    let ticket = thumbnail_loads(&effects)[0].0;

    let (state, _) = update(
        state,
        Msg::ThumbnailDone {
            ticket,
            bytes: Some(vec![1, 2, 3]),
        },
    );
    let (state, _) = update(
        state,
        Msg::ThumbnailDone {
            ticket,
            bytes: Some(vec![9, 9, 9]),
        },
    );

    let loader = state.rows()[0].thumbnail().unwrap();
    assert!(loader.is_settled());
    assert_eq!(loader.data().map(|d| d.to_vec()), Some(vec![1, 2, 3]));
    assert_eq!(
        state.view().rows()[0].thumbnail,
        ThumbnailView::Image {
            ticket,
            bytes: vec![1u8, 2, 3].into(),
        }
    );
}

#[test]
fn failed_loader_stays_empty() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (state, effects) = update(state, Msg::RowsVisible { first: 0, count: 1 });
    let ticket = thumbnail_loads(&effects)[0].0;

    let (mut state, _) = update(state, Msg::ThumbnailDone { ticket, bytes: None });

    assert!(state.consume_dirty());
    let loader = state.rows()[0].thumbnail().unwrap();
    assert!(loader.is_settled());
    assert!(loader.data().is_none());
    assert_eq!(state.view().rows()[0].thumbnail, ThumbnailView::Placeholder);
}

#[test]
fn scrolling_out_cancels_pending_loaders() {
    init_logging();
    let state = loaded(vec![
        article("A", Some("https://img/a.png"), "X"),
        article("B", Some("https://img/b.png"), "Y"),
        article("C", Some("https://img/c.png"), "Z"),
    ]);
    let (state, effects) = update(state, Msg::RowsVisible { first: 0, count: 2 });
    let first_wave = thumbnail_loads(&effects);
    let (state, _) = update(
        state,
        Msg::ThumbnailDone {
            ticket: first_wave[1].0,
            bytes: Some(vec![7]),
        },
    );

    let (state, effects) = update(state, Msg::RowsVisible { first: 1, count: 2 });

    assert_eq!(
        effects,
        vec![
            Effect::CancelThumbnail {
                ticket: first_wave[0].0,
            },
            Effect::LoadThumbnail {
                ticket: 3,
                url: "https://img/c.png".to_string(),
            },
        ]
    );
    assert!(state.rows()[0].thumbnail().is_none());
    assert!(state.rows()[1].thumbnail().unwrap().data().is_some());
}

#[test]
fn late_result_for_disposed_row_is_dropped() {
    init_logging();
    let state = loaded(vec![
        article("A", Some("https://img/a.png"), "X"),
        article("B", Some("https://img/b.png"), "Y"),
    ]);
    let (state, effects) = update(state, Msg::RowsVisible { first: 0, count: 1 });
    let stale = thumbnail_loads(&effects)[0].0;
    let (state, _) = update(state, Msg::RowsVisible { first: 1, count: 1 });
    let (mut state, effects) = update(state, Msg::RowsVisible { first: 0, count: 1 });
    let fresh = thumbnail_loads(&effects)[0].0;
    assert_ne!(stale, fresh);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::ThumbnailDone {
            ticket: stale,
            bytes: Some(vec![1]),
        },
    );

    assert!(!state.consume_dirty());
    let loader = state.rows()[0].thumbnail().unwrap();
    assert_eq!(loader.ticket(), fresh);
    assert!(!loader.is_settled());
}

#[test]
fn identical_urls_get_independent_loaders() {
    init_logging();
    let state = loaded(vec![
        article("A", Some("https://img/same.png"), "X"),
        article("B", Some("https://img/same.png"), "Y"),
    ]);
    let (state, effects) = update(state, Msg::RowsVisible { first: 0, count: 2 });
    let loads = thumbnail_loads(&effects);
    assert_eq!(loads.len(), 2);
    assert_eq!(loads[0].1, loads[1].1);

    let (state, _) = update(
        state,
        Msg::ThumbnailDone {
            ticket: loads[0].0,
            bytes: Some(vec![4, 2]),
        },
    );
    let halfway = state.rows()[1].thumbnail().unwrap().clone();
    assert!(halfway.data().is_none());

    let (state, _) = update(
        state,
        Msg::ThumbnailDone {
            ticket: loads[1].0,
            bytes: Some(vec![4, 2]),
        },
    );

    let first = state.rows()[0].thumbnail().unwrap().data().unwrap().clone();
    let second = state.rows()[1].thumbnail().unwrap().data().unwrap().clone();
    assert_eq!(first, second);
    assert!(!std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn visibility_before_feed_is_noop() {
    let (mut next, effects) = update(AppState::new(), Msg::RowsVisible { first: 0, count: 5 });

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
