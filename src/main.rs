mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use halloween_run::{Game, GameConfig, Key};

/// Environment variable naming the log file.  Unset means no logging, since
/// the terminal itself belongs to the renderer.
const LOG_ENV: &str = "HALLOWEEN_RUN_LOG";
const DEFAULT_CONFIG: &str = "halloween_run.toml";

// ── Key mapping ───────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Held keys ─────────────────────────────────────────────────────────────────

/// Tracks when each held key last produced a press or repeat event.
///
/// Terminals with keyboard enhancement send real `Release` events, so a key
/// stays held until one arrives.  Classic terminals only resend `Press`
/// through OS key-repeat; there a key that has been silent for longer than
/// the hold window is treated as released.
struct HeldKeys {
    last_seen: HashMap<Key, Instant>,
    /// `None` when the terminal reports releases itself.
    window: Option<Duration>,
}

impl HeldKeys {
    fn new(window: Duration, releases_reported: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            window: (!releases_reported).then_some(window),
        }
    }

    fn press(&mut self, key: Key, now: Instant) {
        self.last_seen.insert(key, now);
    }

    fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    /// Remove and return every key whose hold window has lapsed.
    fn expire(&mut self, now: Instant) -> Vec<Key> {
        let Some(window) = self.window else {
            return Vec::new();
        };
        let expired: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, seen)| now.duration_since(**seen) > window)
            .map(|(key, _)| *key)
            .collect();
        for key in &expired {
            self.last_seen.remove(key);
        }
        expired
    }
}

/// Feed one key event to the game.  Returns `false` when the player quits.
fn handle_key(game: &mut Game, held: &mut HeldKeys, event: KeyEvent, now: Instant) -> bool {
    let KeyEvent { code, kind, modifiers, .. } = event;
    if kind == KeyEventKind::Press && is_quit(code, modifiers) {
        return false;
    }
    let Some(key) = map_key(code) else {
        return true;
    };
    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            held.press(key, now);
            game.set_key(key, true);
        }
        KeyEventKind::Release => {
            held.release(key);
            game.set_key(key, false);
        }
    }
    true
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Every frame: drain input, advance the game by
/// the real elapsed time, render, then sleep out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> Result<()> {
    let mut rng = thread_rng();
    let runtime = game.config().runtime.clone();
    let frame_budget = Duration::from_secs_f64(1.0 / runtime.target_fps as f64);
    let mut held = HeldKeys::new(
        Duration::from_millis(runtime.hold_window_ms),
        keyboard_enhanced,
    );
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key_event) = ev {
                if !handle_key(game, &mut held, key_event, frame_start) {
                    return Ok(());
                }
            }
        }
        for key in held.expire(frame_start) {
            game.set_key(key, false);
        }

        let dt_ms = (frame_start.duration_since(last_tick).as_secs_f64() * 1000.0)
            .min(runtime.max_frame_ms);
        last_tick = frame_start;
        game.frame(dt_ms, &mut rng);

        display::render(out, game.world(), &game.hud()).context("rendering frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
    Ok(())
}

fn load_config() -> Result<GameConfig> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    GameConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
}

fn main() -> Result<()> {
    init_tracing()?;
    let config = load_config()?;
    let mut game = Game::new(config);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat events; terminals without support ignore this.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    tracing::info!(keyboard_enhanced, "terminal ready");

    // Blocking event reads live on their own thread so the loop never waits.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, keyboard_enhanced);

    // Always restore the terminal.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let hud = game.hud();
    tracing::info!(best = hud.best, "session ended");
    result
}
