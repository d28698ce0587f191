//! Motion primitives for the Hermes base
pub mod program;

use std::time::Duration;

use crate::error::{DriveError, Result};

/// Instantaneous velocity command for the holonomic base
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityCommand {
    /// Forward speed along the robot's local x-axis (m/s, signed)
    pub forward: f64,
    /// Lateral speed along the local y-axis (m/s, signed, left positive)
    pub lateral: f64,
    /// Angular rate about the vertical axis (rad/s, signed, CCW positive)
    pub angular: f64,
}

impl VelocityCommand {
    /// The all-stop command
    pub const ZERO: VelocityCommand = VelocityCommand {
        forward: 0.0,
        lateral: 0.0,
        angular: 0.0,
    };

    /// Create a new command; magnitudes are caller-supplied and unbounded
    pub fn new(forward: f64, lateral: f64, angular: f64) -> Self {
        VelocityCommand {
            forward,
            lateral,
            angular,
        }
    }

    /// True if every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.lateral == 0.0 && self.angular == 0.0
    }
}

/// A command paired with how long to hold it before the stop goes out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedCommand {
    /// The command to hold
    pub command: VelocityCommand,
    /// Hold time; zero means start and stop back-to-back
    pub duration: Duration,
}

/// One atomic timed motion
///
/// A primitive is pure data: `plan` derives the command to hold and the hold
/// duration, the sequencer performs the emissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionPrimitive {
    /// Straight translation at `speed` m/s for `duration` seconds
    Translate { speed: f64, duration: f64 },
    /// Sideways translation at `speed` m/s for `duration` seconds
    Strafe { speed: f64, duration: f64 },
    /// In-place rotation through `angle_deg` degrees at `angular_speed` rad/s
    Rotate { angle_deg: f64, angular_speed: f64 },
    /// Combined translate-and-rotate tracing a curved path through
    /// `angle_deg` degrees at `speed` m/s
    ArcDrift { angle_deg: f64, speed: f64 },
}

impl MotionPrimitive {
    /// Compute the command to hold and the hold duration.
    ///
    /// Fails with `InvalidParameter` on any parameter set that would produce
    /// an undefined or negative duration. The sign of an angle selects the
    /// direction of motion; it never turns into a negative duration.
    pub fn plan(&self) -> Result<TimedCommand> {
        match *self {
            MotionPrimitive::Translate { speed, duration } => Ok(TimedCommand {
                command: VelocityCommand::new(speed, 0.0, 0.0),
                duration: hold_duration(duration)?,
            }),
            MotionPrimitive::Strafe { speed, duration } => Ok(TimedCommand {
                command: VelocityCommand::new(0.0, speed, 0.0),
                duration: hold_duration(duration)?,
            }),
            MotionPrimitive::Rotate {
                angle_deg,
                angular_speed,
            } => {
                if !(angular_speed > 0.0) {
                    return Err(DriveError::InvalidParameter(format!(
                        "rotation needs a positive angular speed, got {angular_speed}"
                    )));
                }
                let angle_rad = angle_deg.to_radians();
                let rate = if angle_rad > 0.0 {
                    angular_speed
                } else {
                    -angular_speed
                };
                Ok(TimedCommand {
                    command: VelocityCommand::new(0.0, 0.0, rate),
                    duration: hold_duration(angle_rad.abs() / angular_speed)?,
                })
            }
            MotionPrimitive::ArcDrift { angle_deg, speed } => {
                if speed == 0.0 {
                    return Err(DriveError::InvalidParameter(
                        "arc drift needs a non-zero speed".to_string(),
                    ));
                }
                if angle_deg < 0.0 {
                    return Err(DriveError::InvalidParameter(format!(
                        "arc drift angle must be non-negative, got {angle_deg}"
                    )));
                }
                // Hold time tuned on the robot; an approximation of the
                // real kinematics, not a derived model.
                let duration = hold_duration(angle_deg.to_radians() / (2.0 * speed))?;
                Ok(TimedCommand {
                    command: VelocityCommand::new(speed, -speed, 2.0 * speed),
                    duration,
                })
            }
        }
    }
}

/// Validate a hold time in seconds and convert it to a `Duration`
fn hold_duration(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(DriveError::InvalidParameter(format!(
            "hold duration must be finite and non-negative, got {seconds}"
        )));
    }
    Ok(Duration::from_secs_f64(seconds))
}
