mod common;

use common::{article, init_logging, loaded};
use lilnews_core::{update, AppState, Effect, Msg, PageState, ReaderPage, STATUS_TICKS};
use pretty_assertions::assert_eq;

fn page(text: &str) -> ReaderPage {
    ReaderPage {
        title: Some("Page".to_string()),
        text: text.to_string(),
    }
}

#[test]
fn activating_a_row_opens_reader_on_its_url() {
    init_logging();
    let state = loaded(vec![article("A", None, "X"), article("B", None, "Y")]);

    let (state, effects) = update(state, Msg::RowActivated { index: 1 });

    let url = "https://news.example/b".to_string();
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], Effect::LoadPage { url: u, .. } if *u == url));
    let reader = state.view().reader.unwrap();
    assert_eq!(reader.row, 1);
    assert_eq!(reader.url, url);
    assert_eq!(reader.title, "B");
    assert_eq!(reader.page, PageState::Loading);
    assert!(state.rows()[0].reader().is_none());
    assert!(state.rows()[1].reader().is_some());
}

#[test]
fn dismissing_reader_leaves_list_unchanged() {
    init_logging();
    let state = loaded(vec![article("A", None, "X"), article("B", None, "Y")]);
    let list_before = state.view().feed;

    let (state, _) = update(state, Msg::RowActivated { index: 0 });
    let (state, effects) = update(state, Msg::ReaderDismissed);

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.reader.is_none());
    assert_eq!(view.feed, list_before);
}

#[test]
fn only_one_reader_is_open_at_a_time() {
    init_logging();
    let state = loaded(vec![article("A", None, "X"), article("B", None, "Y")]);
    let (state, _) = update(state, Msg::RowActivated { index: 0 });
    let (state, effects) = update(state, Msg::RowActivated { index: 1 });

    assert!(effects.is_empty());
    assert_eq!(state.view().reader.unwrap().row, 0);
}

#[test]
fn out_of_range_activation_is_ignored() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (state, effects) = update(state, Msg::RowActivated { index: 3 });

    assert!(effects.is_empty());
    assert!(state.view().reader.is_none());
}

#[test]
fn page_result_fills_reader_and_stale_results_are_dropped() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (state, effects) = update(state, Msg::RowActivated { index: 0 });
    let Effect::LoadPage { ticket: first, .. } = effects[0].clone() else {
        panic!("expected page load");
    };
    let (state, _) = update(state, Msg::ReaderDismissed);
    let (state, effects) = update(state, Msg::RowActivated { index: 0 });
    let Effect::LoadPage { ticket: second, .. } = effects[0].clone() else {
        panic!("expected page load");
    };

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            ticket: first,
            result: Ok(page("old")),
        },
    );
    assert_eq!(state.view().reader.unwrap().page, PageState::Loading);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            ticket: second,
            result: Err("http status 404".to_string()),
        },
    );
    assert_eq!(
        state.view().reader.unwrap().page,
        PageState::Failed("http status 404".to_string())
    );
}

fn open_loaded_reader(text: &str) -> AppState {
    let state = loaded(vec![article("A", None, "X")]);
    let (state, effects) = update(state, Msg::RowActivated { index: 0 });
    let Effect::LoadPage { ticket, .. } = effects[0].clone() else {
        panic!("expected page load");
    };
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            ticket,
            result: Ok(page(text)),
        },
    );
    state
}

#[test]
fn reader_scrolls_past_logical_lines_until_measured() {
    init_logging();
    // One long paragraph is a single logical line but many wrapped ones.
    let state = open_loaded_reader(&"word ".repeat(400));

    let (state, _) = update(state, Msg::ReaderScrolled(30));
    assert_eq!(state.view().reader.unwrap().scroll, 30);

    let (mut state, _) = update(state, Msg::ReaderMeasured { max_scroll: 24 });
    assert!(state.consume_dirty());
    assert_eq!(state.view().reader.unwrap().scroll, 24);
}

#[test]
fn measured_reader_scroll_is_clamped() {
    init_logging();
    let state = open_loaded_reader("one\ntwo\nthree");
    let (state, _) = update(state, Msg::ReaderMeasured { max_scroll: 7 });

    let (state, _) = update(state, Msg::ReaderScrolled(10));
    assert_eq!(state.view().reader.unwrap().scroll, 7);
    let (state, _) = update(state, Msg::ReaderScrolled(-1));
    assert_eq!(state.view().reader.unwrap().scroll, 6);
    let (state, _) = update(state, Msg::ReaderScrolled(-50));
    assert_eq!(state.view().reader.unwrap().scroll, 0);
}

#[test]
fn loading_reader_does_not_scroll() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (state, _) = update(state, Msg::RowActivated { index: 0 });

    let (state, _) = update(state, Msg::ReaderScrolled(3));

    assert_eq!(state.view().reader.unwrap().scroll, 0);
}

#[test]
fn measurement_without_reader_is_ignored() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (mut state, _) = update(state, Msg::ReaderMeasured { max_scroll: 3 });
    state.consume_dirty();
    assert!(state.view().reader.is_none());
}

#[test]
fn open_in_browser_uses_reader_url() {
    init_logging();
    let state = loaded(vec![article("A", None, "X")]);
    let (state, effects) = update(state, Msg::OpenInBrowserRequested);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::RowActivated { index: 0 });
    let (_state, effects) = update(state, Msg::OpenInBrowserRequested);
    assert_eq!(
        effects,
        vec![Effect::OpenExternal {
            url: "https://news.example/a".to_string(),
        }]
    );
}

#[test]
fn status_reports_are_shown() {
    init_logging();
    let state = loaded(Vec::new());
    let (mut state, _) = update(state, Msg::StatusReported("Opened in browser".to_string()));

    assert!(state.consume_dirty());
    assert_eq!(state.view().status.as_deref(), Some("Opened in browser"));
}

#[test]
fn status_clears_after_a_few_seconds() {
    init_logging();
    let state = loaded(Vec::new());
    let (mut state, _) = update(state, Msg::StatusReported("Opened in browser".to_string()));
    state.consume_dirty();

    for _ in 1..STATUS_TICKS {
        state = update(state, Msg::Tick).0;
    }
    assert!(!state.consume_dirty());
    assert!(state.view().status.is_some());

    let (mut state, _) = update(state, Msg::Tick);
    assert!(state.consume_dirty());
    assert_eq!(state.view().status, None);
}

#[test]
fn newer_status_restarts_the_timer() {
    init_logging();
    let state = loaded(Vec::new());
    let (mut state, _) = update(state, Msg::StatusReported("first".to_string()));
    for _ in 0..STATUS_TICKS - 1 {
        state = update(state, Msg::Tick).0;
    }
    state = update(state, Msg::StatusReported("second".to_string())).0;
    state = update(state, Msg::Tick).0;

    assert_eq!(state.view().status.as_deref(), Some("second"));
}
