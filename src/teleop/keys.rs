//! Raw-mode keyboard input

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::error::Result;

/// Control-C as delivered by a raw terminal
pub const CTRL_C: char = '\u{3}';
/// The Escape key
pub const ESC: char = '\u{1b}';

/// Blocking single-keystroke source
///
/// One raw keystroke per call: no line buffering, no echo, no waiting for a
/// line terminator. Implementations must restore the prior terminal state on
/// every exit path.
pub trait KeyReader {
    /// Block until one keystroke is available
    fn read_key(&mut self) -> Result<char>;
}

/// Scoped raw-mode acquisition; cooked mode is restored on drop
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Key reader on the controlling terminal
///
/// The terminal stays in raw mode for the lifetime of the reader.
pub struct RawTerminalReader {
    _raw_mode: RawModeGuard,
}

impl RawTerminalReader {
    /// Switch the terminal to raw mode until the reader is dropped
    pub fn new() -> Result<Self> {
        Ok(RawTerminalReader {
            _raw_mode: RawModeGuard::acquire()?,
        })
    }
}

impl KeyReader for RawTerminalReader {
    fn read_key(&mut self) -> Result<char> {
        loop {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            {
                if kind != KeyEventKind::Press && kind != KeyEventKind::Repeat {
                    continue;
                }
                match code {
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(CTRL_C)
                    }
                    KeyCode::Char(c) => return Ok(c),
                    KeyCode::Esc => return Ok(ESC),
                    _ => {}
                }
            }
        }
    }
}
