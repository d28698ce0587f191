use anyhow::Result;

use hermes_core::teleop::keys::RawTerminalReader;
use hermes_core::{LogSink, TeleopController};

fn main() -> Result<()> {
    env_logger::init();

    println!("Hermes manual jog");
    println!("  w/s: forward/back    a/d: strafe left/right");
    println!("  q/e/z/c: diagonals   any other key: stop");
    println!("  Esc or Ctrl-C: quit");

    // Raw mode is held by the reader and restored when it drops.
    let keys = RawTerminalReader::new()?;
    let mut teleop = TeleopController::new(LogSink, keys);
    let outcome = teleop.run();
    drop(teleop);

    println!("Jog session ended; base stopped.");
    outcome?;
    Ok(())
}
