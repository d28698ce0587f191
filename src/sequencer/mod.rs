//! Ordered execution of motion programs with a guaranteed stop emission

use std::time::Duration;

use log::{debug, info};
use tokio::sync::watch;
use tokio::time;

use crate::error::{DriveError, Result};
use crate::motion::program::MotionProgram;
use crate::motion::{MotionPrimitive, VelocityCommand};
use crate::sink::CommandSink;

/// Executes motion primitives in order against a command sink.
///
/// Each step is start command, timed hold, stop command. The stop command
/// goes out on every exit path: normal completion, a stop request during the
/// hold, or a planning failure. A step fully completes, stop emission
/// included, before the next one starts.
pub struct Sequencer<S: CommandSink> {
    sink: S,
    stop_rx: watch::Receiver<bool>,
}

impl<S: CommandSink> Sequencer<S> {
    /// Create a sequencer. Sending `true` on the paired `watch` sender
    /// interrupts the current hold at the next suspension point.
    pub fn new(sink: S, stop_rx: watch::Receiver<bool>) -> Self {
        Sequencer { sink, stop_rx }
    }

    /// Run `program` for `repeat` full iterations.
    ///
    /// Stops at the first failure; by the time an error surfaces, the
    /// all-zero command has already been emitted.
    pub async fn run(&mut self, program: &MotionProgram, repeat: usize) -> Result<()> {
        for lap in 0..repeat {
            debug!("lap {}/{} ({} steps)", lap + 1, repeat, program.len());
            for step in program.steps() {
                self.run_step(step).await?;
            }
        }
        Ok(())
    }

    /// Straight translation at `speed` m/s for `duration` seconds
    pub async fn translate(&mut self, speed: f64, duration: f64) -> Result<()> {
        self.run_step(&MotionPrimitive::Translate { speed, duration })
            .await
    }

    /// Sideways translation at `speed` m/s for `duration` seconds
    pub async fn strafe(&mut self, speed: f64, duration: f64) -> Result<()> {
        self.run_step(&MotionPrimitive::Strafe { speed, duration })
            .await
    }

    /// In-place rotation through `angle_deg` degrees at `angular_speed` rad/s
    pub async fn rotate(&mut self, angle_deg: f64, angular_speed: f64) -> Result<()> {
        self.run_step(&MotionPrimitive::Rotate {
            angle_deg,
            angular_speed,
        })
        .await
    }

    /// Curved translate-and-rotate through `angle_deg` degrees at `speed` m/s
    pub async fn arc_drift(&mut self, angle_deg: f64, speed: f64) -> Result<()> {
        self.run_step(&MotionPrimitive::ArcDrift { angle_deg, speed })
            .await
    }

    /// Execute one primitive: start command, timed hold, stop command
    pub async fn run_step(&mut self, step: &MotionPrimitive) -> Result<()> {
        let timed = match step.plan() {
            Ok(timed) => timed,
            Err(err) => {
                // Nothing was started, but leave the base stopped before
                // surfacing the failure.
                self.sink.emit(VelocityCommand::ZERO)?;
                return Err(err);
            }
        };

        info!(
            "{:?}: holding for {:.2} s",
            step,
            timed.duration.as_secs_f64()
        );
        self.sink.emit(timed.command)?;
        let held = self.hold(timed.duration).await;
        // The stop is emitted whether or not the hold ran to completion.
        self.sink.emit(VelocityCommand::ZERO)?;
        held
    }

    /// Suspend for `duration` of wall-clock time, or until a stop request.
    ///
    /// The wait is cooperative; a pending stop request wins over an expiring
    /// timer so interruption is deterministic.
    async fn hold(&mut self, duration: Duration) -> Result<()> {
        let sleep = time::sleep(duration);
        tokio::pin!(sleep);

        tokio::select! {
            biased;
            changed = self.stop_rx.wait_for(|stop| *stop) => match changed {
                Ok(_) => Err(DriveError::Interrupted),
                // Stop source is gone; nothing can interrupt this hold now.
                Err(_) => {
                    sleep.await;
                    Ok(())
                }
            },
            _ = &mut sleep => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;

    fn sequencer(sink: RecordingSink) -> (watch::Sender<bool>, Sequencer<RecordingSink>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        (stop_tx, Sequencer::new(sink, stop_rx))
    }

    #[tokio::test(start_paused = true)]
    async fn translate_emits_start_then_stop_after_duration() {
        let sink = RecordingSink::new();
        let (_stop_tx, mut seq) = sequencer(sink.clone());

        let started = time::Instant::now();
        seq.translate(0.2, 5.0).await.unwrap();

        assert_eq!(
            sink.emissions(),
            vec![VelocityCommand::new(0.2, 0.0, 0.0), VelocityCommand::ZERO]
        );
        assert!((started.elapsed().as_secs_f64() - 5.0).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_translate_is_a_noop_pair() {
        let sink = RecordingSink::new();
        let (_stop_tx, mut seq) = sequencer(sink.clone());

        seq.translate(0.0, 0.0).await.unwrap();

        assert_eq!(
            sink.emissions(),
            vec![VelocityCommand::ZERO, VelocityCommand::ZERO]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rotate_emits_signed_rate() {
        let sink = RecordingSink::new();
        let (_stop_tx, mut seq) = sequencer(sink.clone());

        let started = time::Instant::now();
        seq.rotate(-90.0, 0.2).await.unwrap();

        assert_eq!(
            sink.emissions(),
            vec![VelocityCommand::new(0.0, 0.0, -0.2), VelocityCommand::ZERO]
        );
        let expected = 90.0_f64.to_radians() / 0.2;
        assert!((started.elapsed().as_secs_f64() - expected).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_request_mid_hold_emits_one_zero_and_interrupts() {
        let sink = RecordingSink::new();
        let (stop_tx, mut seq) = sequencer(sink.clone());

        let program = MotionProgram::from_steps(vec![
            MotionPrimitive::Translate {
                speed: 0.2,
                duration: 5.0,
            },
            MotionPrimitive::Strafe {
                speed: 0.2,
                duration: 5.0,
            },
        ]);

        let canceller = async {
            time::sleep(Duration::from_secs(2)).await;
            stop_tx.send(true).unwrap();
        };
        let (outcome, ()) = tokio::join!(seq.run(&program, 1), canceller);

        assert!(matches!(outcome, Err(DriveError::Interrupted)));
        // Exactly one terminal zero; the second step never starts.
        assert_eq!(
            sink.emissions(),
            vec![VelocityCommand::new(0.2, 0.0, 0.0), VelocityCommand::ZERO]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stop_request_before_run_interrupts_first_hold() {
        let sink = RecordingSink::new();
        let (stop_tx, mut seq) = sequencer(sink.clone());
        stop_tx.send(true).unwrap();

        let outcome = seq.translate(0.2, 5.0).await;

        assert!(matches!(outcome, Err(DriveError::Interrupted)));
        assert_eq!(
            sink.emissions(),
            vec![VelocityCommand::new(0.2, 0.0, 0.0), VelocityCommand::ZERO]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn planning_failure_stops_the_program() {
        let sink = RecordingSink::new();
        let (_stop_tx, mut seq) = sequencer(sink.clone());

        let program = MotionProgram::from_steps(vec![
            MotionPrimitive::Translate {
                speed: 0.2,
                duration: 1.0,
            },
            MotionPrimitive::ArcDrift {
                angle_deg: 90.0,
                speed: 0.0,
            },
            MotionPrimitive::Strafe {
                speed: 0.2,
                duration: 1.0,
            },
        ]);

        let outcome = seq.run(&program, 1).await;

        assert!(matches!(outcome, Err(DriveError::InvalidParameter(_))));
        // First step runs in full; the bad step emits only the zero command;
        // the third step never starts.
        assert_eq!(
            sink.emissions(),
            vec![
                VelocityCommand::new(0.2, 0.0, 0.0),
                VelocityCommand::ZERO,
                VelocityCommand::ZERO,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sink_failure_surfaces_immediately() {
        struct DeadSink;
        impl CommandSink for DeadSink {
            fn emit(&self, _command: VelocityCommand) -> Result<()> {
                Err(DriveError::SinkUnavailable("gone".to_string()))
            }
            fn name(&self) -> &str {
                "DeadSink"
            }
        }

        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut seq = Sequencer::new(DeadSink, stop_rx);

        let outcome = seq.translate(0.2, 5.0).await;
        assert!(matches!(outcome, Err(DriveError::SinkUnavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_stop_source_still_completes_the_hold() {
        let sink = RecordingSink::new();
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut seq = Sequencer::new(sink.clone(), stop_rx);
        drop(stop_tx);

        let started = time::Instant::now();
        seq.translate(0.2, 3.0).await.unwrap();

        assert!((started.elapsed().as_secs_f64() - 3.0).abs() < 1e-6);
        assert_eq!(sink.emissions().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_repeats_runs_nothing() {
        let sink = RecordingSink::new();
        let (_stop_tx, mut seq) = sequencer(sink.clone());

        seq.run(&MotionProgram::rectangle_lap(), 0).await.unwrap();
        assert!(sink.emissions().is_empty());
    }
}
