mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_siege::compute::{
    apply_upgrade, init_state, return_to_menu, set_input_flags, start_next_round, tick,
};
use space_siege::entities::Phase;
use space_siege::menu::{self, MenuAction};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One driver loop for every phase — playing, the two round-end screens and
/// the upgrade menu are all states of the same `GameState`, ticked at 60 Hz.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the still-"fresh" keys (within
/// `HOLD_WINDOW` frames) become the player's input flags, so Space and a
/// direction key can be held at the same time with no interference.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut state = init_state(width, height);
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if matches!(state.phase, Phase::GameOver { won: false }) =>
                            {
                                state = return_to_menu(&state);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code.clone(), frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                // Clicks only mean something on the upgrade menu; anywhere
                // else (and anywhere off the buttons) they are ignored.
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if state.phase == Phase::Menu {
                        let layout = menu::layout(state.width, state.height);
                        match menu::hit_test(&layout, column as i32, row as i32) {
                            Some(MenuAction::Upgrade(kind)) => {
                                state = apply_upgrade(&state, kind);
                            }
                            Some(MenuAction::NextRound) => {
                                state = start_next_round(&state);
                            }
                            None => {}
                        }
                    }
                }
                _ => {}
            }
        }

        // ── Snapshot held keys into the player's input flags ──────────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);
        let fire = is_held(&key_frame, &KeyCode::Char(' '), frame);

        state = set_input_flags(&state, left, right, fire);
        state = tick(&state, &mut rng);

        display::render(out, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
