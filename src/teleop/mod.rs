//! Manual single-key jogging
pub mod keys;

use std::collections::HashMap;

use log::info;

use self::keys::{KeyReader, CTRL_C, ESC};
use crate::error::Result;
use crate::motion::VelocityCommand;
use crate::sink::CommandSink;

/// Default jog speed multiplier (m/s)
pub const DEFAULT_JOG_SPEED: f64 = 0.2;

/// Map a jog key to its (forward, lateral) direction signs.
///
/// Magnitudes are unscaled; the caller applies a speed multiplier. The four
/// corner keys jog diagonally.
pub fn jog_binding(key: char) -> Option<(f64, f64)> {
    match key {
        'w' => Some((1.0, 0.0)),
        's' => Some((-1.0, 0.0)),
        'a' => Some((0.0, 1.0)),
        'd' => Some((0.0, -1.0)),
        'q' => Some((1.0, 1.0)),
        'e' => Some((1.0, -1.0)),
        'z' => Some((-1.0, 1.0)),
        'c' => Some((-1.0, -1.0)),
        _ => None,
    }
}

/// Drives the base from single keystrokes until Esc or Ctrl-C
///
/// A bound key emits the scaled jog command, any unbound key emits the
/// all-zero command, and the all-zero command also goes out on every exit
/// path of the loop.
pub struct TeleopController<S: CommandSink, K: KeyReader> {
    sink: S,
    keys: K,
    speed: f64,
}

impl<S: CommandSink, K: KeyReader> TeleopController<S, K> {
    /// Create a controller with the default jog speed
    pub fn new(sink: S, keys: K) -> Self {
        TeleopController {
            sink,
            keys,
            speed: DEFAULT_JOG_SPEED,
        }
    }

    /// Configure the controller with parameters
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        if let Some(&speed) = params.get("speed") {
            self.speed = speed;
        }
        Ok(())
    }

    /// Run the jog loop until the operator quits.
    ///
    /// The all-stop command is emitted before this returns, on success and
    /// on failure alike.
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.jog_loop();
        let stopped = self.sink.emit(VelocityCommand::ZERO);
        outcome.and(stopped)
    }

    fn jog_loop(&mut self) -> Result<()> {
        loop {
            let key = self.keys.read_key()?;
            match jog_binding(key) {
                Some((forward, lateral)) => {
                    self.sink.emit(VelocityCommand::new(
                        forward * self.speed,
                        lateral * self.speed,
                        0.0,
                    ))?;
                }
                None if key == ESC || key == CTRL_C => {
                    info!("teleop: quit requested");
                    return Ok(());
                }
                // any unbound key stops the base
                None => self.sink.emit(VelocityCommand::ZERO)?,
            }
        }
    }
}
