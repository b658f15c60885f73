use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use lilnews_core::{update, AppState, AppViewModel, Msg};
use lilnews_logging::{news_info, LogDestination};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::{self, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui::render::{self, Screen};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raw mode plus alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("enter alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                Err(err).context("create terminal")
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub fn run_app() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);
    let (config, note) = config::load(config_path);
    lilnews_logging::initialize(
        LogDestination::File(config.log_file.clone()),
        lilnews_logging::parse_level(&config.log_level),
    );
    config::log_load_outcome(config_path, note.as_deref());
    news_info!("Starting with feed {}", config.feed_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.engine_config(), msg_tx.clone());

    // Background tick for the spinners.
    let tick_tx = msg_tx.clone();
    thread::spawn(move || {
        while tick_tx.send(Msg::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let mut session = TerminalSession::new()?;
    let mut state = AppState::with_failure_display(config.feed_failure.into());
    let mut screen = Screen::default();
    let mut view = state.view();
    let mut needs_draw = true;

    let _ = msg_tx.send(Msg::Started);

    loop {
        if needs_draw {
            session
                .terminal
                .draw(|frame| render::draw(frame, &view, &mut screen))
                .context("draw frame")?;
            needs_draw = false;
            if let Some(visible) = screen.take_visible_change() {
                let _ = msg_tx.send(Msg::RowsVisible {
                    first: visible.start,
                    count: visible.len(),
                });
            }
            if let Some(max_scroll) = screen.take_reader_limit_change() {
                let _ = msg_tx.send(Msg::ReaderMeasured { max_scroll });
            }
        }

        if event::poll(POLL_INTERVAL).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key_action(key, &view, &screen) {
                        KeyAction::Quit => break,
                        KeyAction::Send(msg) => {
                            let _ = msg_tx.send(msg);
                        }
                        KeyAction::Select(delta) => {
                            screen.select_offset(delta, view.rows().len());
                            needs_draw = true;
                        }
                        KeyAction::ScrollPage(pages) => {
                            let _ = msg_tx.send(Msg::ReaderScrolled(
                                pages * screen.reader_page_lines(),
                            ));
                        }
                        KeyAction::Ignore => {}
                    }
                }
                Event::Resize(..) => needs_draw = true,
                _ => {}
            }
        }

        runner.pump();
        while let Ok(msg) = msg_rx.try_recv() {
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.enqueue(effects);
            if state.consume_dirty() {
                view = state.view();
                needs_draw = true;
            }
        }
    }

    news_info!("Shutting down");
    Ok(())
}

#[derive(Debug, PartialEq)]
enum KeyAction {
    Quit,
    Send(Msg),
    Select(isize),
    ScrollPage(i32),
    Ignore,
}

fn key_action(key: KeyEvent, view: &AppViewModel, screen: &Screen) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    if view.reader.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                KeyAction::Send(Msg::ReaderDismissed)
            }
            KeyCode::Down | KeyCode::Char('j') => KeyAction::Send(Msg::ReaderScrolled(1)),
            KeyCode::Up | KeyCode::Char('k') => KeyAction::Send(Msg::ReaderScrolled(-1)),
            KeyCode::PageDown | KeyCode::Char(' ') => KeyAction::ScrollPage(1),
            KeyCode::PageUp => KeyAction::ScrollPage(-1),
            KeyCode::Char('o') => KeyAction::Send(Msg::OpenInBrowserRequested),
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Select(1),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Select(-1),
        KeyCode::PageDown => KeyAction::Select(5),
        KeyCode::PageUp => KeyAction::Select(-5),
        KeyCode::Enter => match screen.selected() {
            Some(index) if index < view.rows().len() => {
                KeyAction::Send(Msg::RowActivated { index })
            }
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}
