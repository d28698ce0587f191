use anyhow::Result;
use log::{error, info, warn};
use tokio::sync::watch;

use hermes_core::{ChannelSink, CommandSink, DriveError, MotionProgram, Sequencer, VelocityCommand};

/// Number of full passes over the reference program
const REPEAT_COUNT: usize = 2;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let program = MotionProgram::rectangle_lap();
    info!(
        "Using parameters: repeat={}, steps_per_lap={}",
        REPEAT_COUNT,
        program.len()
    );
    let lap = program.planned_duration()?;
    info!("Planned hold time per lap: {:.1} s", lap.as_secs_f64());

    // The receiving half is where the platform's motor transport attaches.
    let (sink, mut commands) = ChannelSink::channel();
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            info!(
                "cmd_vel -> forward={:.2} lateral={:.2} angular={:.2}",
                command.forward, command.lateral, command.angular
            );
        }
    });

    println!("Controlling the Hermes base");
    println!("Press Enter to start the drive sequence...");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    // Ctrl-C becomes a stop request, observed at the next suspension point.
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(true);
        }
    });

    let mut sequencer = Sequencer::new(sink.clone(), stop_rx);
    let outcome = sequencer.run(&program, REPEAT_COUNT).await;

    // Last-resort stop at the process boundary.
    let _ = sink.emit(VelocityCommand::ZERO);

    match outcome {
        Ok(()) => {
            info!("Drive sequence complete");
            Ok(())
        }
        Err(DriveError::Interrupted) => {
            warn!("Drive sequence interrupted; base stopped");
            std::process::exit(130);
        }
        Err(err) => {
            error!("Drive sequence aborted: {err}");
            Err(err.into())
        }
    }
}
