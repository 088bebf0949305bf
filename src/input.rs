/// Input collector: turns raw key events into a per-tick snapshot.
///
/// Instead of acting on each key event individually, we keep a `key_frame`
/// map that records the frame number of the last press/repeat event for
/// every key.  A key counts as held while it was seen within `HOLD_WINDOW`
/// frames, which covers terminals that never send release events.  On
/// terminals with keyboard enhancement the release event drops the key
/// immediately.
///
/// Jump is an edge, not a level: each Space press raises one jump that the
/// next [`InputCollector::sample`] consumes.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.
pub const HOLD_WINDOW: u64 = 4;

/// What the simulation sees for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    /// One-shot: true for exactly one tick per Space press.
    pub jump: bool,
}

/// Requests aimed at the program rather than the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    BackToMenu,
}

#[derive(Debug, Default)]
pub struct InputCollector {
    key_frame: HashMap<KeyCode, u64>,
    jump_pending: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key event seen during `frame`.
    pub fn record(&mut self, event: &KeyEvent, frame: u64) -> Option<Command> {
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(event.code, frame);
                match event.code {
                    KeyCode::Char(' ') => self.jump_pending = true,
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Command::Quit),
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Some(Command::Quit);
                    }
                    KeyCode::Esc => return Some(Command::BackToMenu),
                    _ => {}
                }
            }
            // Repeat keeps a key held but never re-triggers a jump.
            KeyEventKind::Repeat => {
                self.key_frame.insert(event.code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&event.code);
            }
        }
        None
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Snapshot for the tick at `frame`; consumes a pending jump.
    pub fn sample(&mut self, frame: u64) -> InputSnapshot {
        let held = |keys: &[KeyCode]| keys.iter().any(|&k| self.is_held(k, frame));
        let left = held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
        let right = held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);
        let jump = std::mem::take(&mut self.jump_pending);
        InputSnapshot { left, right, jump }
    }

    /// Forget held keys and any pending jump (used between games).
    pub fn clear(&mut self) {
        self.key_frame.clear();
        self.jump_pending = false;
    }
}
