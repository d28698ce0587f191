//! Core functionality for the Hermes mobile robot
//!
//! Open-loop timed motion: primitives that derive hold durations and
//! directions from requested speeds and angles, a sequencer that emits each
//! start/stop command pair with a cancellation-safe timed hold in between,
//! and single-key teleoperation for manual jogging. Every motion that emits
//! a non-zero velocity command is followed by the all-zero command on every
//! exit path.

pub mod error;
pub mod motion;
pub mod sequencer;
pub mod sink;
pub mod teleop;

// Re-export commonly used items for easier access
pub use error::DriveError;
pub use motion::program::MotionProgram;
pub use motion::{MotionPrimitive, TimedCommand, VelocityCommand};
pub use sequencer::Sequencer;
pub use sink::{ChannelSink, CommandSink, LogSink, RecordingSink};
pub use teleop::TeleopController;
