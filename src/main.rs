use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use rocket_defense::display::{self, Viewport};
use rocket_defense::input::DEFAULT_HOLD_WINDOW;
use rocket_defense::{Game, GameConfig};

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "ROCKET_DEFENSE_CONFIG";

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading config from {CONFIG_ENV}")),
        None => Ok(GameConfig::default()),
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player closes the game.  Game over does not stop the loop:
/// the engine freezes and the renderer keeps showing the end screen.
///
/// Terminals with keyboard enhancement report proper `Release` events.  Classic
/// terminals only repeat `Press`, so held keys are expired after
/// `DEFAULT_HOLD_WINDOW` of silence instead.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<StdRng>,
    rx: &mpsc::Receiver<Event>,
    releases_reported: bool,
) -> anyhow::Result<()> {
    let frame = game.config().frame_duration();
    let start = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now = start.elapsed();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    game.key_pressed(code, now);
                }
                KeyEventKind::Release => game.key_released(code),
            }
        }
        if !releases_reported {
            game.expire_keys(now, DEFAULT_HOLD_WINDOW);
        }

        game.step(now);

        let (cols, rows) = terminal::size()?;
        display::render(out, game.state(), Viewport::new(cols, rows))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; redirect it (`2>game.log`) to keep the screen clean.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = load_config()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(config, rng);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the kitty protocol ignore it.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("keyboard enhancement: {keyboard_enhanced}");

    // Dedicate a thread to blocking event reads so the frame loop never blocks.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input reader stopped: {e}");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
