#![warn(clippy::all, clippy::pedantic)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use log::{debug, error, info, warn};
use phasefall::config::loader::load_config_from_file;
use phasefall::config::Config;
use phasefall::records::RecordStore;
use phasefall::ui::{self, HistoryView, Screen};
use phasefall::{Difficulty, Game, GameEvent, GameObserver, Hold};
use ratatui::{Terminal, prelude::*};

// Without key release events a held down key is seen as repeated presses;
// fast drop stops once they have been quiet this long.
const FAST_DROP_IDLE: Duration = Duration::from_millis(150);
const RENDER_INTERVAL: Duration = Duration::from_millis(33); // ~30 FPS

fn main() -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("phasefall.log")
        .context("failed to create log file")?;

    // The terminal belongs to the UI, so logs go to the file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Phasefall");

    let config = load_config_from_file().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        Config::default()
    });

    let history = RecordStore::open(RecordStore::default_path()).unwrap_or_else(|e| {
        warn!("Could not open game records, keeping them in memory: {e}");
        RecordStore::in_memory()
    });
    let history = Rc::new(RefCell::new(history));

    let mut game = Game::from_config(&config);
    let sink = Rc::clone(&history);
    game.add_observer(move |event: &GameEvent| sink.borrow_mut().on_event(event));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let key_release = supports_keyboard_enhancement().unwrap_or(false);
    if key_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut game, &history, key_release);

    if key_release {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &mut Game,
    history: &Rc<RefCell<RecordStore>>,
    key_release: bool,
) -> Result<()> {
    let mut last_update = Instant::now();
    let mut last_render: Option<Instant> = None;
    let mut last_down_press: Option<Instant> = None;
    let mut screen = Screen::Game;

    loop {
        if last_render.is_none_or(|t| t.elapsed() >= RENDER_INTERVAL) {
            terminal.draw(|f| ui::render(f, game, &history.borrow(), &screen))?;
            last_render = Some(Instant::now());
        }

        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");
                let mut close_history = false;
                let mut open_history = false;
                match &mut screen {
                    Screen::History(view) => {
                        if key.kind == KeyEventKind::Press {
                            close_history =
                                handle_history_key(&mut history.borrow_mut(), view, key.code);
                        }
                    }
                    Screen::Game => {
                        if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('v') {
                            // The game stays frozen while the records are shown
                            game.pause();
                            game.stop_fast_drop();
                            open_history = true;
                        } else if key_release {
                            if handle_key_with_release(game, key) {
                                return Ok(());
                            }
                        } else if key.kind != KeyEventKind::Release {
                            if is_down(key.code) {
                                last_down_press = Some(Instant::now());
                            }
                            if handle_key(game, key.code) {
                                return Ok(());
                            }
                        }
                    }
                }
                if close_history {
                    screen = Screen::Game;
                } else if open_history {
                    screen = Screen::History(HistoryView::default());
                }
            }
        }

        if !key_release
            && last_down_press.is_some_and(|t| t.elapsed() >= FAST_DROP_IDLE)
        {
            game.stop_fast_drop();
            last_down_press = None;
        }

        let now = Instant::now();
        game.update(now - last_update);
        last_update = now;
    }
}

/// Applies a key press on the records screen. Returns true when the screen
/// should close.
fn handle_history_key(history: &mut RecordStore, view: &mut HistoryView, code: KeyCode) -> bool {
    if view.confirm_clear {
        view.confirm_clear = false;
        if code == KeyCode::Char('y') {
            match history.clear() {
                Ok(()) => info!("Cleared game records"),
                Err(e) => error!("Failed to clear game records: {e}"),
            }
        }
        return false;
    }

    match code {
        KeyCode::Char('v') | KeyCode::Esc => return true,
        KeyCode::Char('a') => view.filter = None,
        KeyCode::Char('1') => view.filter = Some(Difficulty::Easy),
        KeyCode::Char('2') => view.filter = Some(Difficulty::Normal),
        KeyCode::Char('3') => view.filter = Some(Difficulty::Hard),
        KeyCode::Char('c') => view.confirm_clear = true,
        _ => {}
    }
    false
}

fn is_down(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('j'))
}

fn hold_for(code: KeyCode) -> Option<Hold> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Hold::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Hold::Right),
        KeyCode::Up | KeyCode::Char('k') => Some(Hold::Rotate),
        _ => None,
    }
}

// Terminals that report releases: holds repeat from the game's own timers
fn handle_key_with_release(game: &mut Game, key: KeyEvent) -> bool {
    match key.kind {
        KeyEventKind::Press => {
            if let Some(hold) = hold_for(key.code) {
                game.press(hold);
                false
            } else {
                handle_key(game, key.code)
            }
        }
        KeyEventKind::Release => {
            if let Some(hold) = hold_for(key.code) {
                game.release(hold);
            } else if is_down(key.code) {
                game.stop_fast_drop();
            }
            false
        }
        KeyEventKind::Repeat => false,
    }
}

/// Applies a key press. Returns true when the player asked to quit.
fn handle_key(game: &mut Game, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Left | KeyCode::Char('h') => {
            game.move_left();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            game.move_right();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            game.rotate();
        }
        KeyCode::Down | KeyCode::Char('j') => game.start_fast_drop(),
        KeyCode::Char(' ') => {
            game.hard_drop();
        }
        KeyCode::Char('p') => game.toggle_pause(),
        KeyCode::Char('s') => game.start(),
        KeyCode::Char('r') => game.reset(),
        KeyCode::Char('1') => {
            game.set_difficulty(Difficulty::Easy);
        }
        KeyCode::Char('2') => {
            game.set_difficulty(Difficulty::Normal);
        }
        KeyCode::Char('3') => {
            game.set_difficulty(Difficulty::Hard);
        }
        KeyCode::Char('f') => {
            let family = game.state().family.next();
            game.set_family(family);
        }
        _ => {}
    }
    false
}
