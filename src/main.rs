mod display;

use std::error::Error;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use display::Viewport;
use tower_defense::compute::{init_state, step};
use tower_defense::config::SimConfig;
use tower_defense::entities::{FrameInput, SimulationState};

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60); // 60 FPS

enum LoopExit {
    Quit,
    Restart,
}

fn init_tracing() {
    // stderr stays quiet by default so it does not bleed into the alternate screen.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the player quits or asks for a restart after losing.
///
/// Each frame drains every pending event without blocking, folds mouse
/// presses into a `FrameInput`, steps the simulation once and renders.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: SimulationState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, &state);

    loop {
        let frame_start = Instant::now();
        let mut input = FrameInput::none();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if state.is_lost() => {
                            return Ok(LoopExit::Restart);
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), column, row, .. }) => {
                    if let Some(at) = view.to_playfield(column, row) {
                        input.clicks.push(at);
                    }
                }
                Event::Resize(cols, rows) => {
                    view = Viewport::new(cols, rows, &state);
                }
                _ => {}
            }
        }

        state = step(state, &input);

        display::render(out, &state, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    // Read config before touching the terminal so a bad value prints plainly.
    let config = SimConfig::from_env()?;
    info!(wave_policy = ?config.wave_policy, targeting = ?config.targeting, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Blocking reads happen on their own thread so a frame never waits on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!(%err, "input thread stopped");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    Ok(())
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &SimConfig) -> std::io::Result<()> {
    loop {
        let state = init_state(config.clone());
        match game_loop(out, state, rx)? {
            LoopExit::Quit => break,
            LoopExit::Restart => info!("restarting"),
        }
    }
    Ok(())
}
