//! Motion program assembly

use std::time::Duration;

use super::MotionPrimitive;
use crate::error::Result;

/// Cruise speed for the straight legs of the reference lap (m/s)
pub const CRUISE_SPEED: f64 = 0.2;
/// Hold time per straight leg (s); roughly one metre at cruise speed
pub const LEG_DURATION: f64 = 5.0;
/// Turn rate for the in-place rotation (rad/s)
pub const TURN_RATE: f64 = 0.2;
/// Speed for the closing arc drift (m/s)
pub const DRIFT_SPEED: f64 = 0.4;

/// An ordered, repeatable list of motion primitives
///
/// Pure data: programs can be swapped without touching the sequencer.
#[derive(Debug, Clone, Default)]
pub struct MotionProgram {
    steps: Vec<MotionPrimitive>,
}

impl MotionProgram {
    /// Create an empty program
    pub fn new() -> Self {
        MotionProgram { steps: Vec::new() }
    }

    /// Create a program from a list of steps
    pub fn from_steps(steps: Vec<MotionPrimitive>) -> Self {
        MotionProgram { steps }
    }

    /// Append a step to the program
    pub fn push(&mut self, step: MotionPrimitive) {
        self.steps.push(step);
    }

    /// The steps in execution order
    pub fn steps(&self) -> &[MotionPrimitive] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the program has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total hold time of one pass over the program
    pub fn planned_duration(&self) -> Result<Duration> {
        let mut total = Duration::ZERO;
        for step in &self.steps {
            total += step.plan()?.duration;
        }
        Ok(total)
    }

    /// One lap of the reference path: out, across, quarter turn clockwise,
    /// back across, and a drifting arc that closes the loop.
    pub fn rectangle_lap() -> Self {
        MotionProgram::from_steps(vec![
            MotionPrimitive::Translate {
                speed: CRUISE_SPEED,
                duration: LEG_DURATION,
            },
            MotionPrimitive::Strafe {
                speed: CRUISE_SPEED,
                duration: LEG_DURATION,
            },
            MotionPrimitive::Rotate {
                angle_deg: -90.0,
                angular_speed: TURN_RATE,
            },
            MotionPrimitive::Strafe {
                speed: -CRUISE_SPEED,
                duration: LEG_DURATION,
            },
            MotionPrimitive::ArcDrift {
                angle_deg: 90.0,
                speed: DRIFT_SPEED,
            },
        ])
    }
}
